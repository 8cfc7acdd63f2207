use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Lifetimes applied to each half of a token pair, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenLifetimes {
    /// # Errors
    /// * `InvalidLifetimes` - A lifetime is not positive, or refresh is shorter than access
    pub fn new(access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Result<Self, JwtError> {
        if access_ttl_seconds <= 0 || refresh_ttl_seconds < access_ttl_seconds {
            return Err(JwtError::InvalidLifetimes {
                access: access_ttl_seconds,
                refresh: refresh_ttl_seconds,
            });
        }

        Ok(Self {
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }

    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }
}

/// Freshly minted access/refresh tokens and their expiry instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

/// Mints signed access/refresh pairs.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    /// # Arguments
    /// * `secret` - HMAC signing key
    /// * `lifetimes` - Validated access/refresh lifetimes
    pub fn new(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Mint a new pair for a subject.
    ///
    /// # Arguments
    /// * `subject` - User identifier placed in `sub`
    /// * `username` - Username placed in the claims
    /// * `issued_at` - Issuance instant; both expiries are offsets from it
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing either token failed
    pub fn issue_pair(
        &self,
        subject: &str,
        username: &str,
        issued_at: i64,
    ) -> Result<TokenPair, JwtError> {
        let access = TokenClaims::new(
            TokenKind::Access,
            subject,
            username,
            issued_at,
            self.lifetimes.access_ttl_seconds,
        );
        let refresh = TokenClaims::new(
            TokenKind::Refresh,
            subject,
            username,
            issued_at,
            self.lifetimes.refresh_ttl_seconds,
        );

        Ok(TokenPair {
            access_token: self.handler.encode(&access)?,
            refresh_token: self.handler.encode(&refresh)?,
            access_expires_at: access.exp,
            refresh_expires_at: refresh.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, TokenLifetimes::new(100, 1000).unwrap())
    }

    #[test]
    fn test_lifetimes_reject_refresh_shorter_than_access() {
        let result = TokenLifetimes::new(600, 60);
        assert!(matches!(
            result,
            Err(JwtError::InvalidLifetimes {
                access: 600,
                refresh: 60
            })
        ));
    }

    #[test]
    fn test_lifetimes_reject_non_positive_access() {
        assert!(TokenLifetimes::new(0, 60).is_err());
    }

    #[test]
    fn test_lifetimes_allow_equal_windows() {
        assert!(TokenLifetimes::new(60, 60).is_ok());
    }

    #[test]
    fn test_issue_pair_expiries() {
        let pair = issuer().issue_pair("user-1", "alice", 1000).unwrap();

        assert_eq!(pair.access_expires_at, 1100);
        assert_eq!(pair.refresh_expires_at, 2000);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_issue_pair_twice_differs() {
        let issuer = issuer();

        let first = issuer.issue_pair("user-1", "alice", 1000).unwrap();
        let second = issuer.issue_pair("user-1", "alice", 1000).unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_ne!(first.refresh_token, second.refresh_token);
    }
}
