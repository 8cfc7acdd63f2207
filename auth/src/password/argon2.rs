use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Plaintext hashed once at construction so unknown-user lookups can burn the
/// same verification cost as a real mismatch.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalisation";

/// Argon2id password hasher producing PHC strings.
pub struct PasswordHasher {
    dummy_hash: Option<String>,
}

impl PasswordHasher {
    /// Create a new password hasher with Argon2id defaults.
    ///
    /// Precomputes the hash used by [`PasswordHasher::verify_dummy`].
    pub fn new() -> Self {
        let dummy_hash = hash_with_random_salt(DUMMY_PASSWORD).ok();
        Self { dummy_hash }
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with_random_salt(password)
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password supplied by the caller
    /// * `hash` - Stored PHC string
    ///
    /// # Returns
    /// `true` when the password matches
    ///
    /// # Errors
    /// * `MalformedHash` - The stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Run a full verification against an internal hash and discard the result.
    ///
    /// Used when no stored hash exists for the presented identity. Always
    /// returns `false`.
    pub fn verify_dummy(&self, password: &str) -> bool {
        if let Some(hash) = &self.dummy_hash {
            let _ = self.verify(password, hash);
        }
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_with_random_salt(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}
