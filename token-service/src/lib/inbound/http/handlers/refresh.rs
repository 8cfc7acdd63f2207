use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::authorization_header;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::token::models::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let refresh_token = bearer_token(authorization_header(&headers)).ok_or_else(|| {
        ApiError::BadRequest("Expected Authorization: Bearer <refresh token>".to_string())
    })?;

    state
        .token_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::OK, record.into()))
}
