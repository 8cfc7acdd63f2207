use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::bearer_token;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::models::TokenState;
use crate::domain::token::ports::Clock;
use crate::domain::token::ports::TokenGenerator;
use crate::domain::token::ports::TokenRepository;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::ports::CredentialStore;

/// Token lifecycle engine.
///
/// Decides, per user, whether to mint, reuse or rotate the single token
/// record. All time comparisons go through the injected clock.
///
/// Sign-in reuses a record while either window is open; refresh rotates as
/// soon as the access window closes. The asymmetry is intentional.
pub struct TokenService<CS, TR, TG, C>
where
    CS: CredentialStore,
    TR: TokenRepository,
    TG: TokenGenerator,
    C: Clock,
{
    credentials: Arc<CS>,
    tokens: Arc<TR>,
    generator: Arc<TG>,
    clock: Arc<C>,
}

impl<CS, TR, TG, C> TokenService<CS, TR, TG, C>
where
    CS: CredentialStore,
    TR: TokenRepository,
    TG: TokenGenerator,
    C: Clock,
{
    /// Create a new token service with injected dependencies.
    ///
    /// # Arguments
    /// * `credentials` - User lookup and password verification
    /// * `tokens` - Token record persistence
    /// * `generator` - Token pair minting
    /// * `clock` - Time source for every expiry comparison
    pub fn new(credentials: Arc<CS>, tokens: Arc<TR>, generator: Arc<TG>, clock: Arc<C>) -> Self {
        Self {
            credentials,
            tokens,
            generator,
            clock,
        }
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, TokenError> {
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.credentials.find_user_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.credentials.verify_unknown_user(password).await;
            tracing::info!("Sign-in rejected");
            return Err(TokenError::InvalidCredentials);
        };

        if !self.credentials.verify_password(&user, password).await? {
            tracing::info!("Sign-in rejected");
            return Err(TokenError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Mint a pair for `user` and overwrite whatever record it had.
    async fn issue(&self, user: &User, now: i64) -> Result<TokenRecord, TokenError> {
        let tokens = self.generator.generate(user, now).await?;
        self.tokens.upsert(TokenRecord::issued(user.id, tokens)).await
    }
}

#[async_trait]
impl<CS, TR, TG, C> TokenServicePort for TokenService<CS, TR, TG, C>
where
    CS: CredentialStore,
    TR: TokenRepository,
    TG: TokenGenerator,
    C: Clock,
{
    async fn sign_in_and_authorize(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenRecord, TokenError> {
        let user = self.authenticate(username, password).await?;
        let now = self.clock.now();

        let Some(record) = self.tokens.find_by_user_id(&user.id).await? else {
            tracing::info!(user_id = %user.id, "Issuing first token pair");
            return self.issue(&user, now).await;
        };

        match record.state_at(now) {
            TokenState::AccessValid | TokenState::AccessExpiredRefreshValid => {
                tracing::info!(user_id = %user.id, "Token or refresh token still valid");
                Ok(record)
            }
            TokenState::FullyExpired => {
                tracing::info!(user_id = %user.id, "Issuing new token pair after expiry");
                self.issue(&user, now).await
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenRecord, TokenError> {
        let Some(record) = self.tokens.find_by_refresh_token(refresh_token).await? else {
            tracing::info!("Refresh rejected: unknown refresh token");
            return Err(TokenError::RefreshTokenExpired);
        };

        let now = self.clock.now();
        match record.state_at(now) {
            TokenState::AccessValid => Ok(record),
            TokenState::AccessExpiredRefreshValid => {
                let Some(user) = self.credentials.find_user_by_id(&record.user_id).await? else {
                    tracing::warn!(user_id = %record.user_id, "Refresh token owner no longer exists");
                    return Err(TokenError::RefreshTokenExpired);
                };

                tracing::info!(user_id = %user.id, "Rotating token pair");
                self.issue(&user, now).await
            }
            TokenState::FullyExpired => {
                tracing::info!(user_id = %record.user_id, "Refresh rejected: refresh token expired");
                Err(TokenError::RefreshTokenExpired)
            }
        }
    }

    async fn validate(&self, bearer_header_value: &str) -> Result<bool, TokenError> {
        let Some(access_token) = bearer_token(bearer_header_value) else {
            return Ok(false);
        };

        let record = self.tokens.find_by_access_token(access_token).await?;
        let now = self.clock.now();

        Ok(record.is_some_and(|record| record.is_access_valid_at(now)))
    }
}
