use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user registration.
pub struct UserService<CS>
where
    CS: CredentialStore,
{
    credentials: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> UserService<CS>
where
    CS: CredentialStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `credentials` - Credential persistence implementation
    /// * `authenticator` - Password hashing
    pub fn new(credentials: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            credentials,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> UserServicePort for UserService<CS>
where
    CS: CredentialStore,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.credentials.create_user(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }
}
