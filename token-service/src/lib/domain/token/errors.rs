use thiserror::Error;

use crate::user::errors::UserError;

/// Errors raised by the token lifecycle engine and its collaborators.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh token unknown, superseded by a rotation, or past its window.
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Credential store error: {0}")]
    CredentialStore(#[from] UserError),

    #[error("Token store conflict: {0}")]
    Conflict(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
