use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::inbound::http::router::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    body: Result<Json<AuthorizeRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body?;
    body.validate()?;

    state
        .token_service
        .sign_in_and_authorize(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::OK, record.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizeRequestBody {
    username: String,
    password: String,
}

impl AuthorizeRequestBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::BadRequest("username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(ApiError::BadRequest("password is required".to_string()));
        }
        Ok(())
    }
}
