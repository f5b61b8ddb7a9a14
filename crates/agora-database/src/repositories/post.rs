//! Post repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::post::{CreatePost, Post};

/// Repository for post CRUD, moderation flags, and reports.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by primary key, including soft-deleted rows.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Find a post by primary key, excluding soft-deleted rows.
    pub async fn find_visible_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// List visible posts with pagination, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Post>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count posts", e)
                })?;

        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(
            posts,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List visible posts of one topic, newest first.
    pub async fn find_by_topic(&self, topic_id: Uuid) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE topic_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list topic posts", e))
    }

    /// Create a new post.
    pub async fn create(&self, data: &CreatePost) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content, topic_id, author_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.topic_id)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post", e))
    }

    /// Update a post's title and/or content.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = COALESCE($2, title), \
             content = COALESCE($3, content) \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Post not found"),
            other => AppError::with_source(ErrorKind::Database, "Failed to update post", other),
        })
    }

    /// Soft-delete a post by stamping `deleted_at`.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Post not found"),
            other => AppError::with_source(ErrorKind::Database, "Failed to soft-delete post", other),
        })
    }

    /// Hard-delete a post. Comments cascade away with the row.
    pub async fn hard_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a report from a user. Reporters are deduplicated.
    pub async fn add_report(&self, id: Uuid, reporter: Uuid) -> AppResult<Post> {
        let updated = sqlx::query_as::<_, Post>(
            "UPDATE posts SET reports = array_append(reports, $2) \
             WHERE id = $1 AND NOT (reports @> ARRAY[$2]) RETURNING *",
        )
        .bind(id)
        .bind(reporter)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to report post", e))?;

        match updated {
            Some(post) => Ok(post),
            None => self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Post not found")),
        }
    }

    /// Close a post to further comments.
    pub async fn close(&self, id: Uuid) -> AppResult<Post> {
        sqlx::query_as::<_, Post>("UPDATE posts SET closed = TRUE WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => AppError::not_found("Post not found"),
                other => AppError::with_source(ErrorKind::Database, "Failed to close post", other),
            })
    }
}
