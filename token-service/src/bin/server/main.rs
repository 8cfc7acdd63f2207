use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use token_service::config::Config;
use token_service::config::StorageBackend;
use token_service::domain::token::ports::TokenRepository;
use token_service::domain::token::ports::TokenServicePort;
use token_service::domain::token::service::TokenService;
use token_service::domain::user::ports::CredentialStore;
use token_service::domain::user::ports::UserServicePort;
use token_service::domain::user::service::UserService;
use token_service::inbound::http::router::create_router;
use token_service::outbound::clock::SystemClock;
use token_service::outbound::repositories::InMemoryCredentialStore;
use token_service::outbound::repositories::InMemoryTokenRepository;
use token_service::outbound::repositories::PostgresCredentialStore;
use token_service::outbound::repositories::PostgresTokenRepository;
use token_service::outbound::tokens::JwtTokenGenerator;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "token-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let lifetimes = config.tokens.lifetimes()?;
    let authenticator = Arc::new(Authenticator::new(
        config.tokens.secret.as_bytes(),
        lifetimes,
    ));

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        access_ttl_seconds = authenticator.lifetimes().access_ttl_seconds(),
        refresh_ttl_seconds = authenticator.lifetimes().refresh_ttl_seconds(),
        "Configuration loaded"
    );

    let (token_service, user_service) = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresCredentialStore::new(
                    pg_pool.clone(),
                    Arc::clone(&authenticator),
                )),
                Arc::new(PostgresTokenRepository::new(pg_pool)),
                &authenticator,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users and tokens are lost on restart");
            build_services(
                Arc::new(InMemoryCredentialStore::new(Arc::clone(&authenticator))),
                Arc::new(InMemoryTokenRepository::new()),
                &authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(token_service, user_service)).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

fn build_services<CS, TR>(
    credentials: Arc<CS>,
    tokens: Arc<TR>,
    authenticator: &Arc<Authenticator>,
) -> (Arc<dyn TokenServicePort>, Arc<dyn UserServicePort>)
where
    CS: CredentialStore,
    TR: TokenRepository,
{
    let token_service = TokenService::new(
        Arc::clone(&credentials),
        tokens,
        Arc::new(JwtTokenGenerator::new(Arc::clone(authenticator))),
        Arc::new(SystemClock),
    );
    let user_service = UserService::new(credentials, Arc::clone(authenticator));

    (Arc::new(token_service), Arc::new(user_service))
}
