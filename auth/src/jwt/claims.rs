use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose of a token within an access/refresh pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every token this crate issues.
///
/// `jti` is random per token, so two pairs minted for the same subject within
/// the same second still encode to different strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,

    /// Access or refresh
    pub typ: TokenKind,
}

impl TokenClaims {
    /// Build claims for one token of a pair.
    ///
    /// # Arguments
    /// * `kind` - Access or refresh
    /// * `subject` - User identifier
    /// * `username` - Username embedded for downstream consumers
    /// * `issued_at` - Issuance instant (Unix timestamp)
    /// * `ttl_seconds` - Lifetime added to `issued_at` to get `exp`
    pub fn new(
        kind: TokenKind,
        subject: impl ToString,
        username: impl ToString,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            username: username.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
            typ: kind,
        }
    }
}
