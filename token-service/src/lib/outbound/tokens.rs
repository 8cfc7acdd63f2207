use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::IssuedTokens;
use crate::domain::token::ports::TokenGenerator;
use crate::domain::user::models::User;

/// Token generator backed by signed JWT pairs.
pub struct JwtTokenGenerator {
    authenticator: Arc<Authenticator>,
}

impl JwtTokenGenerator {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl TokenGenerator for JwtTokenGenerator {
    async fn generate(&self, user: &User, issued_at: i64) -> Result<IssuedTokens, TokenError> {
        self.authenticator
            .issue_tokens(&user.id.to_string(), user.username.as_str(), issued_at)
            .map(IssuedTokens::from)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtHandler;
    use auth::TokenClaims;
    use auth::TokenKind;
    use auth::TokenLifetimes;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[tokio::test]
    async fn test_generate_uses_configured_lifetimes() {
        let authenticator = Arc::new(Authenticator::new(
            SECRET,
            TokenLifetimes::new(100, 1000).unwrap(),
        ));
        let generator = JwtTokenGenerator::new(authenticator);
        let user = User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        };

        let tokens = generator.generate(&user, 1000).await.unwrap();
        assert_eq!(tokens.access_expires_at, 1100);
        assert_eq!(tokens.refresh_expires_at, 2000);

        let claims: TokenClaims = JwtHandler::new(SECRET)
            .decode(&tokens.access_token)
            .unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.typ, TokenKind::Access);
    }
}
