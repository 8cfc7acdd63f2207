use async_trait::async_trait;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::IssuedTokens;
use crate::domain::token::models::TokenRecord;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the token lifecycle engine.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Verify credentials and return the user's token pair.
    ///
    /// Mints on first login and when both windows have closed; otherwise the
    /// stored record is returned unchanged, even if only the refresh window
    /// is still open.
    ///
    /// # Arguments
    /// * `username` - Raw username as presented
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Current token record for the user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `GenerationFailed` - Token generator failed
    /// * `DatabaseError` / `CredentialStore` - A collaborator failed
    async fn sign_in_and_authorize(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenRecord, TokenError>;

    /// Exchange a refresh token for the user's token pair.
    ///
    /// While the access window is open the stored record is returned
    /// unchanged. Once it closes, a refresh inside the refresh window rotates
    /// both tokens.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token value
    ///
    /// # Returns
    /// Current (possibly rotated) token record
    ///
    /// # Errors
    /// * `RefreshTokenExpired` - Unknown, superseded or expired refresh token
    /// * `GenerationFailed` - Token generator failed
    /// * `DatabaseError` / `CredentialStore` - A collaborator failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenRecord, TokenError>;

    /// Report whether the bearer access token in a header value is live.
    ///
    /// Never fails on malformed input; that is simply `false`.
    ///
    /// # Arguments
    /// * `bearer_header_value` - Raw `Authorization` header value (may be empty)
    ///
    /// # Errors
    /// * `DatabaseError` - Token store lookup failed
    async fn validate(&self, bearer_header_value: &str) -> Result<bool, TokenError>;
}

/// Persistence for token records, one per user.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<TokenRecord>, TokenError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError>;

    /// Insert the record, or replace the user's existing one, atomically per user.
    ///
    /// # Returns
    /// The record as stored
    ///
    /// # Errors
    /// * `Conflict` - A token value is already held by another user
    /// * `DatabaseError` - Database operation failed
    async fn upsert(&self, record: TokenRecord) -> Result<TokenRecord, TokenError>;
}

/// Produces fresh token pairs.
#[async_trait]
pub trait TokenGenerator: Send + Sync + 'static {
    /// Mint a new pair for `user`, with expiries measured from `issued_at`.
    ///
    /// # Errors
    /// * `GenerationFailed` - Signing or encoding failed
    async fn generate(&self, user: &User, issued_at: i64) -> Result<IssuedTokens, TokenError>;
}

/// Source of the current time as a Unix timestamp in seconds.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> i64;
}
