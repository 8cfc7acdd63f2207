//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the token service:
//! - Password hashing (Argon2id) with dummy verification for unknown identities
//! - Signed access/refresh token pairs (HS256 JWT)
//! - An `Authenticator` facade combining both
//!
//! Expiry decisions are left to the caller, which owns the clock. Issued
//! tokens carry `exp`, but decoding here only checks signatures.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, TokenLifetimes};
//!
//! let lifetimes = TokenLifetimes::new(900, 86_400).unwrap();
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", lifetimes);
//!
//! let pair = auth.issue_tokens("user123", "alice", 1_700_000_000).unwrap();
//! assert_eq!(pair.access_expires_at, 1_700_000_900);
//! assert_eq!(pair.refresh_expires_at, 1_700_086_400);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenKind;
pub use jwt::TokenLifetimes;
pub use jwt::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
