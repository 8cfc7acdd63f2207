use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenLifetimes;
use crate::jwt::TokenPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential checks and token issuance behind one handle.
///
/// Shared between the credential store adapter (hashing, verification) and the
/// token generator adapter (issuance).
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing tokens
    /// * `lifetimes` - Access/refresh lifetimes for issued pairs
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret, lifetimes),
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.token_issuer.lifetimes()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// `None` means no stored hash exists for the identity; a dummy
    /// verification still runs so the caller cannot be timed into revealing
    /// which case occurred.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No stored hash, or the password does not match
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => self.password_hasher.verify_dummy(password),
        };

        if is_valid {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Mint an access/refresh pair.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `username` - Username embedded in the claims
    /// * `issued_at` - Issuance instant (Unix timestamp)
    ///
    /// # Errors
    /// * `JwtError` - Signing failed
    pub fn issue_tokens(
        &self,
        subject: &str,
        username: &str,
        issued_at: i64,
    ) -> Result<TokenPair, JwtError> {
        self.token_issuer.issue_pair(subject, username, issued_at)
    }
}
