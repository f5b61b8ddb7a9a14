//! Session token repository implementation.
//!
//! The token collection is owned row-by-row by its user: insertion order is
//! issuance order, and the `users` foreign key cascades on account deletion.

use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_entity::session::SessionToken;

/// Repository for the per-user session token collections.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the user's token collection with a single fresh token.
    ///
    /// Runs in one transaction so a failed insert leaves the previous
    /// collection intact (issuance must never persist partial state).
    pub async fn replace_for_user(&self, user_id: Uuid, token: &str) -> AppResult<SessionToken> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM session_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear token collection", e)
            })?;

        let created = sqlx::query_as::<_, SessionToken>(
            "INSERT INTO session_tokens (user_id, token) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert token", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit token replacement", e)
        })?;

        Ok(created)
    }

    /// Find a token row by its exact string.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<SessionToken>> {
        sqlx::query_as::<_, SessionToken>("SELECT * FROM session_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find token", e))
    }

    /// List a user's tokens in issuance order.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<SessionToken>> {
        sqlx::query_as::<_, SessionToken>(
            "SELECT * FROM session_tokens WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tokens", e))
    }

    /// Flag every token of one user as revoked. Idempotent.
    ///
    /// Returns the number of rows touched.
    pub async fn revoke_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE session_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Flag every token of every user as revoked. Idempotent.
    ///
    /// Returns the number of rows touched.
    pub async fn revoke_all(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE session_tokens SET revoked = TRUE WHERE revoked = FALSE")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke all tokens", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Physically clear a user's token collection ("log out of all devices").
    pub async fn delete_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM session_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear token collection", e)
            })?;
        Ok(result.rows_affected())
    }
}
