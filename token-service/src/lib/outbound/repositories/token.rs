use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::UserId;

/// Token records in the `oauth_tokens` table.
///
/// The table's `id` column is never selected; it does not exist outside SQL.
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        column: TokenColumn,
        value: &str,
    ) -> Result<Option<TokenRecord>, TokenError> {
        let query = format!(
            r#"
            SELECT user_id, access_token, refresh_token, access_expires_at, refresh_expires_at
            FROM oauth_tokens
            WHERE {} = $1
            "#,
            column.as_str()
        );

        sqlx::query_as::<_, TokenRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(TokenRecord::from))
            .map_err(|e| TokenError::DatabaseError(e.to_string()))
    }
}

#[derive(Clone, Copy)]
enum TokenColumn {
    AccessToken,
    RefreshToken,
}

impl TokenColumn {
    fn as_str(&self) -> &'static str {
        match self {
            TokenColumn::AccessToken => "access_token",
            TokenColumn::RefreshToken => "refresh_token",
        }
    }
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    user_id: Uuid,
    access_token: String,
    refresh_token: String,
    access_expires_at: i64,
    refresh_expires_at: i64,
}

impl From<TokenRow> for TokenRecord {
    fn from(row: TokenRow) -> Self {
        TokenRecord {
            user_id: UserId(row.user_id),
            access_token: row.access_token,
            refresh_token: row.refresh_token,
            access_expires_at: row.access_expires_at,
            refresh_expires_at: row.refresh_expires_at,
        }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<TokenRecord>, TokenError> {
        sqlx::query_as::<_, TokenRow>(
            r#"
            SELECT user_id, access_token, refresh_token, access_expires_at, refresh_expires_at
            FROM oauth_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(TokenRecord::from))
        .map_err(|e| TokenError::DatabaseError(e.to_string()))
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError> {
        self.find_one(TokenColumn::RefreshToken, refresh_token).await
    }

    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<TokenRecord>, TokenError> {
        self.find_one(TokenColumn::AccessToken, access_token).await
    }

    async fn upsert(&self, record: TokenRecord) -> Result<TokenRecord, TokenError> {
        sqlx::query_as::<_, TokenRow>(
            r#"
            INSERT INTO oauth_tokens
                (user_id, access_token, refresh_token, access_expires_at, refresh_expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                access_expires_at = EXCLUDED.access_expires_at,
                refresh_expires_at = EXCLUDED.refresh_expires_at
            RETURNING user_id, access_token, refresh_token, access_expires_at, refresh_expires_at
            "#,
        )
        .bind(record.user_id.0)
        .bind(&record.access_token)
        .bind(&record.refresh_token)
        .bind(record.access_expires_at)
        .bind(record.refresh_expires_at)
        .fetch_one(&self.pool)
        .await
        .map(TokenRecord::from)
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return TokenError::Conflict(format!(
                        "token value already issued ({})",
                        db_err.constraint().unwrap_or("unknown constraint")
                    ));
                }
            }
            tracing::error!(user_id = %record.user_id, error = %e, "Token upsert failed");
            TokenError::DatabaseError(e.to_string())
        })
    }
}
