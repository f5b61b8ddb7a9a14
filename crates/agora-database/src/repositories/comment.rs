//! Comment repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_entity::comment::{Comment, CreateComment};

/// Repository for comment CRUD, moderation flags, and reports.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a comment by primary key, including soft-deleted rows.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Find a comment by primary key, excluding soft-deleted rows.
    pub async fn find_visible_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// List visible comments of one post, oldest first.
    pub async fn find_by_post(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list post comments", e))
    }

    /// List all visible comments, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Create a new comment.
    pub async fn create(&self, data: &CreateComment) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (content, post_id, author_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.content)
        .bind(data.post_id)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Update a comment's content.
    pub async fn update(&self, id: Uuid, content: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2 WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Comment not found"),
            other => AppError::with_source(ErrorKind::Database, "Failed to update comment", other),
        })
    }

    /// Soft-delete a comment by stamping `deleted_at`.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Comment not found"),
            other => {
                AppError::with_source(ErrorKind::Database, "Failed to soft-delete comment", other)
            }
        })
    }

    /// Hard-delete a comment.
    pub async fn hard_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a report from a user. Reporters are deduplicated.
    pub async fn add_report(&self, id: Uuid, reporter: Uuid) -> AppResult<Comment> {
        let updated = sqlx::query_as::<_, Comment>(
            "UPDATE comments SET reports = array_append(reports, $2) \
             WHERE id = $1 AND NOT (reports @> ARRAY[$2]) RETURNING *",
        )
        .bind(id)
        .bind(reporter)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to report comment", e))?;

        match updated {
            Some(comment) => Ok(comment),
            None => self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Comment not found")),
        }
    }
}
