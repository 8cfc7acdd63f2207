use crate::domain::user::models::UserId;

/// Authorization state for exactly one user.
///
/// Plain value type: storage surrogate keys never appear here. Timestamps are
/// Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

/// Where a record sits in its lifecycle at a given instant.
///
/// A user without a record is the implicit fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    AccessValid,
    AccessExpiredRefreshValid,
    FullyExpired,
}

impl TokenRecord {
    /// Bind freshly issued tokens to a user.
    pub fn issued(user_id: UserId, tokens: IssuedTokens) -> Self {
        Self {
            user_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }
    }

    /// Lifecycle state at `now`. Each window is open strictly before its expiry.
    pub fn state_at(&self, now: i64) -> TokenState {
        if now < self.access_expires_at {
            TokenState::AccessValid
        } else if now < self.refresh_expires_at {
            TokenState::AccessExpiredRefreshValid
        } else {
            TokenState::FullyExpired
        }
    }

    pub fn is_access_valid_at(&self, now: i64) -> bool {
        self.state_at(now) == TokenState::AccessValid
    }
}

/// Output of a token generator: a new pair with its expiry instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

impl From<auth::TokenPair> for IssuedTokens {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` value.
///
/// Returns `None` for anything that is not a non-empty bearer credential.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .trim()
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
