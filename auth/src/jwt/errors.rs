use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Refresh lifetime ({refresh}s) must not be shorter than access lifetime ({access}s)")]
    InvalidLifetimes { access: i64, refresh: i64 },
}
