use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user registration.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
}

/// Storage and verification of user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user with an already hashed password.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_user_by_username(&self, username: &Username)
        -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Check a plaintext password against the user's stored credential.
    ///
    /// # Returns
    /// `true` when the password matches
    ///
    /// # Errors
    /// * `Password` - Stored credential is unreadable
    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError>;

    /// Spend the cost of one password verification without a stored credential.
    ///
    /// Called when the username did not resolve, so an unknown user and a wrong
    /// password take comparable time.
    async fn verify_unknown_user(&self, password: &str);
}
