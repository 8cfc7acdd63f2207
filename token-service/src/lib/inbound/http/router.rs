use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authorize::authorize;
use super::handlers::create_user::create_user;
use super::handlers::health::health;
use super::handlers::refresh::refresh;
use super::handlers::validate::validate;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
}

pub fn create_router(
    token_service: Arc<dyn TokenServicePort>,
    user_service: Arc<dyn UserServicePort>,
) -> Router {
    let state = AppState {
        token_service,
        user_service,
    };

    let token_routes = Router::new()
        .route("/authorize", post(authorize))
        .route("/refresh", post(refresh))
        .route("/validate", get(validate));

    let user_routes = Router::new().route("/users", post(create_user));

    // Authorization headers carry credentials and are kept out of spans.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(token_routes)
        .merge(user_routes)
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
