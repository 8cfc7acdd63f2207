use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::check_password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

pub struct PostgresCredentialStore {
    pool: PgPool,
    authenticator: Arc<Authenticator>,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool, authenticator: Arc<Authenticator>) -> Self {
        Self {
            pool,
            authenticator,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// Rows whose username fails current validation map to no user.
    fn into_user(self) -> Option<User> {
        match Username::new(self.username) {
            Ok(username) => Some(User {
                id: UserId(self.id),
                username,
                password_hash: self.password_hash,
                created_at: self.created_at,
            }),
            Err(e) => {
                tracing::warn!(user_id = %self.id, error = %e, "Stored username is invalid, treating user as unknown");
                None
            }
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create_user(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_username_key")
                {
                    return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.and_then(UserRow::into_user))
        .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.and_then(UserRow::into_user))
        .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError> {
        check_password(&self.authenticator, user, password)
    }

    async fn verify_unknown_user(&self, password: &str) {
        let _ = self.authenticator.verify_password(password, None);
    }
}
