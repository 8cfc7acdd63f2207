use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Low-level HS256 encoder/decoder.
///
/// Decoding checks the signature only. Expiry is a decision for the caller,
/// which owns the clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a shared secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes for HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature of a JWT and return its claims.
    ///
    /// # Errors
    /// * `DecodingFailed` - Malformed token, bad signature or claims mismatch
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::TokenClaims;
    use crate::jwt::claims::TokenKind;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = TokenClaims::new(TokenKind::Access, "user-1", "alice", 1000, 60);

        let token = handler.encode(&claims).expect("Failed to encode token");
        let decoded: TokenClaims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let handler = JwtHandler::new(SECRET);
        // Expired decades ago
        let claims = TokenClaims::new(TokenKind::Access, "user-1", "alice", 1, 1);

        let token = handler.encode(&claims).unwrap();
        assert!(handler.decode::<TokenClaims>(&token).is_ok());
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<TokenClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let signer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");
        let claims = TokenClaims::new(TokenKind::Refresh, "user-1", "alice", 1000, 60);

        let token = signer.encode(&claims).unwrap();
        assert!(verifier.decode::<TokenClaims>(&token).is_err());
    }
}
