use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::authorization_header;
use super::ApiError;
use crate::inbound::http::router::AppState;

/// Always answers 200; validity is carried in the body text.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, &'static str), ApiError> {
    let valid = state
        .token_service
        .validate(authorization_header(&headers))
        .await?;

    if valid {
        Ok((StatusCode::OK, "Valid token"))
    } else {
        Ok((StatusCode::OK, "Invalid token"))
    }
}
