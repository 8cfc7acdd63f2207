use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use tokio::sync::RwLock;

use super::check_password;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

/// Process-local credential store. State is lost on restart.
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<UserId, User>>,
    authenticator: Arc<Authenticator>,
}

impl InMemoryCredentialStore {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            authenticator,
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError> {
        check_password(&self.authenticator, user, password)
    }

    async fn verify_unknown_user(&self, password: &str) {
        let _ = self.authenticator.verify_password(password, None);
    }
}

/// Process-local token store keyed by user.
///
/// Upserts run under the write lock, so one user never ends up with two records.
#[derive(Default)]
pub struct InMemoryTokenRepository {
    records: RwLock<HashMap<UserId, TokenRecord>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<TokenRecord>, TokenError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.refresh_token == refresh_token)
            .cloned())
    }

    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.access_token == access_token)
            .cloned())
    }

    async fn upsert(&self, record: TokenRecord) -> Result<TokenRecord, TokenError> {
        let mut records = self.records.write().await;

        // Token values are unique across users, as the SQL constraints require.
        let clash = records.values().any(|other| {
            other.user_id != record.user_id
                && (other.access_token == record.access_token
                    || other.refresh_token == record.refresh_token)
        });
        if clash {
            return Err(TokenError::Conflict(
                "token value already issued".to_string(),
            ));
        }

        records.insert(record.user_id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenLifetimes;
    use chrono::Utc;

    use super::*;

    fn record(user_id: UserId, suffix: &str) -> TokenRecord {
        TokenRecord {
            user_id,
            access_token: format!("access-{suffix}"),
            refresh_token: format!("refresh-{suffix}"),
            access_expires_at: 1100,
            refresh_expires_at: 2000,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_record_for_same_user() {
        let repository = InMemoryTokenRepository::new();
        let user_id = UserId::new();

        repository.upsert(record(user_id, "one")).await.unwrap();
        repository.upsert(record(user_id, "two")).await.unwrap();

        assert_eq!(repository.len().await, 1);
        let stored = repository.find_by_user_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.access_token, "access-two");

        // Superseded values are no longer resolvable
        assert!(repository
            .find_by_refresh_token("refresh-one")
            .await
            .unwrap()
            .is_none());
        assert!(repository
            .find_by_access_token("access-one")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_upsert_rejects_token_held_by_other_user() {
        let repository = InMemoryTokenRepository::new();

        repository
            .upsert(record(UserId::new(), "shared"))
            .await
            .unwrap();
        let result = repository.upsert(record(UserId::new(), "shared")).await;

        assert!(matches!(result, Err(TokenError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_concurrent_upserts_keep_one_record_per_user() {
        let repository = Arc::new(InMemoryTokenRepository::new());
        let user_id = UserId::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move {
                    repository
                        .upsert(record(user_id, &i.to_string()))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_credential_store_duplicate_username() {
        let authenticator = Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            TokenLifetimes::new(60, 600).unwrap(),
        ));
        let store = InMemoryCredentialStore::new(Arc::clone(&authenticator));
        let user = User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: authenticator.hash_password("password123").unwrap(),
            created_at: Utc::now(),
        };

        store.create_user(user.clone()).await.unwrap();
        let duplicate = User {
            id: UserId::new(),
            ..user.clone()
        };
        let result = store.create_user(duplicate).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));

        let found = store
            .find_user_by_username(&user.username)
            .await
            .unwrap()
            .unwrap();
        assert!(store.verify_password(&found, "password123").await.unwrap());
        assert!(!store.verify_password(&found, "nope").await.unwrap());
    }
}
