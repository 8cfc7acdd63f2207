use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenRecord;
use crate::user::errors::UserError;

pub mod authorize;
pub mod create_user;
pub mod health;
pub mod refresh;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidCredentials => {
                ApiError::Unauthorized("User not found or wrong password".to_string())
            }
            TokenError::RefreshTokenExpired => ApiError::Unauthorized(err.to_string()),
            TokenError::GenerationFailed(_)
            | TokenError::CredentialStore(_)
            | TokenError::Conflict(_)
            | TokenError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::EmptyPassword => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Token fields returned by `/authorize` and `/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseData {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

impl From<&TokenRecord> for TokenResponseData {
    fn from(record: &TokenRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            access_token: record.access_token.clone(),
            refresh_token: record.refresh_token.clone(),
            access_expires_at: record.access_expires_at,
            refresh_expires_at: record.refresh_expires_at,
        }
    }
}

/// Raw `Authorization` header value, empty when absent or not valid UTF-8.
fn authorization_header(headers: &HeaderMap) -> &str {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_token_response_uses_camel_case() {
        let record = TokenRecord {
            user_id: UserId::new(),
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            access_expires_at: 1100,
            refresh_expires_at: 2000,
        };

        let json = serde_json::to_value(TokenResponseData::from(&record)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(json["userId"], record.user_id.to_string());
        assert_eq!(json["accessExpiresAt"], 1100);
        assert_eq!(json["refreshExpiresAt"], 2000);
        assert!(!keys.contains(&"id"));
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_credential_errors_map_to_same_response() {
        assert_eq!(
            ApiError::from(TokenError::InvalidCredentials),
            ApiError::Unauthorized("User not found or wrong password".to_string())
        );
        assert_eq!(
            ApiError::from(TokenError::RefreshTokenExpired),
            ApiError::Unauthorized("Refresh token expired".to_string())
        );
    }

    #[test]
    fn test_store_failures_are_internal() {
        let err = ApiError::from(TokenError::DatabaseError("down".to_string()));
        assert!(matches!(err, ApiError::InternalServerError(_)));
    }

    #[test]
    fn test_authorization_header_missing() {
        assert_eq!(authorization_header(&HeaderMap::new()), "");
    }
}
