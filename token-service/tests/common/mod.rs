use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::TokenLifetimes;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use token_service::domain::token::service::TokenService;
use token_service::domain::user::service::UserService;
use token_service::inbound::http::router::create_router;
use token_service::outbound::clock::FixedClock;
use token_service::outbound::repositories::InMemoryCredentialStore;
use token_service::outbound::repositories::InMemoryTokenRepository;
use token_service::outbound::tokens::JwtTokenGenerator;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_TTL: i64 = 100;
pub const REFRESH_TTL: i64 = 1000;
pub const START: i64 = 1_700_000_000;

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub clock: Arc<FixedClock>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            TEST_SECRET,
            TokenLifetimes::new(ACCESS_TTL, REFRESH_TTL).unwrap(),
        ));
        let clock = Arc::new(FixedClock::new(START));
        let credentials = Arc::new(InMemoryCredentialStore::new(Arc::clone(&authenticator)));
        let tokens = Arc::new(InMemoryTokenRepository::new());

        let token_service = Arc::new(TokenService::new(
            Arc::clone(&credentials),
            Arc::clone(&tokens),
            Arc::new(JwtTokenGenerator::new(Arc::clone(&authenticator))),
            Arc::clone(&clock),
        ));
        let user_service = Arc::new(UserService::new(credentials, authenticator));

        let router = create_router(token_service, user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            clock,
            tokens,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register a user and assert it was created
    pub async fn create_user(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/users")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Sign in and return the raw response
    pub async fn authorize(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/authorize")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in, assert success and return the token body
    pub async fn authorize_ok(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self.authorize(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Present a refresh token as a bearer credential
    pub async fn refresh(&self, refresh_token: &str) -> reqwest::Response {
        self.post("/refresh")
            .bearer_auth(refresh_token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Validate an access token and return the body text
    pub async fn validate(&self, access_token: &str) -> String {
        let response = self
            .get("/validate")
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read response")
    }
}

/// Throwaway Postgres database, created only when `DATABASE_URL` is set
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a uniquely named database and run migrations against it.
    ///
    /// Returns `None` when `DATABASE_URL` is unset, so callers can skip.
    pub async fn new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_token_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }

    /// Close the pool and drop the database
    pub async fn cleanup(self) {
        self.pool.close().await;

        if let Ok(mut conn) = PgConnection::connect(&self.admin_url).await {
            let _ = conn
                .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, self.db_name).as_str())
                .await;
        }
    }
}
