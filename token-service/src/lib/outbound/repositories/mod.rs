pub mod memory;
pub mod token;
pub mod user;

pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryTokenRepository;
pub use token::PostgresTokenRepository;
pub use user::PostgresCredentialStore;

use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Password check shared by the credential store adapters.
fn check_password(
    authenticator: &Authenticator,
    user: &User,
    password: &str,
) -> Result<bool, UserError> {
    match authenticator.verify_password(password, Some(&user.password_hash)) {
        Ok(()) => Ok(true),
        Err(AuthenticationError::InvalidCredentials) => Ok(false),
        Err(AuthenticationError::PasswordError(e)) => Err(UserError::from(e)),
        Err(AuthenticationError::JwtError(e)) => Err(UserError::Unknown(e.to_string())),
    }
}
