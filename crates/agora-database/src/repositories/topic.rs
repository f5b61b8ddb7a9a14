//! Topic repository implementation, including the moderation request queues
//! and the approval flow's two-entity transaction.

use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_entity::topic::{CreateTopic, RequestStatus, Topic, TopicDeleteRequest, TopicUpdateRequest};
use agora_entity::user::{User, UserRole};

/// Repository for topic CRUD, request queues, and the approval transaction.
#[derive(Debug, Clone)]
pub struct TopicRepository {
    pool: PgPool,
}

impl TopicRepository {
    /// Create a new topic repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a topic by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Topic>> {
        sqlx::query_as::<_, Topic>("SELECT * FROM topics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find topic", e))
    }

    /// List approved topics (pending requests excluded), newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Topic>> {
        sqlx::query_as::<_, Topic>(
            "SELECT * FROM topics WHERE requested_by IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list topics", e))
    }

    /// List pending topic creation requests, oldest first.
    pub async fn find_pending_requests(&self) -> AppResult<Vec<Topic>> {
        sqlx::query_as::<_, Topic>(
            "SELECT * FROM topics WHERE requested_by IS NOT NULL ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending topics", e)
        })
    }

    /// Create a topic. The author is installed as the first moderator.
    pub async fn create(&self, data: &CreateTopic) -> AppResult<Topic> {
        sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (title, description, category_id, author_id, requested_by, moderators) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category_id)
        .bind(data.author_id)
        .bind(data.requested_by)
        .bind(vec![data.author_id])
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create topic", e))
    }

    /// Apply a title/description change to a topic.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Topic> {
        sqlx::query_as::<_, Topic>(
            "UPDATE topics SET title = COALESCE($2, title), \
             description = COALESCE($3, description) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Topic not found"),
            other => AppError::with_source(ErrorKind::Database, "Failed to update topic", other),
        })
    }

    /// Delete a topic. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete topic", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Approve a pending topic creation request.
    ///
    /// One transaction updates both entities: the topic gains the requester
    /// as author and moderator and drops the pending marker, and the
    /// requester is promoted user→moderator. Admin and moderator roles are
    /// never downgraded by this write.
    pub async fn approve_request(&self, topic_id: Uuid) -> AppResult<(Topic, User)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let topic = sqlx::query_as::<_, Topic>("SELECT * FROM topics WHERE id = $1 FOR UPDATE")
            .bind(topic_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find topic", e))?
            .ok_or_else(|| AppError::not_found("Topic not found"))?;

        let requester = topic
            .requested_by
            .ok_or_else(|| AppError::validation("No user requested this topic"))?;

        let topic = sqlx::query_as::<_, Topic>(
            "UPDATE topics SET author_id = $2, requested_by = NULL, \
             moderators = (SELECT ARRAY(SELECT DISTINCT unnest(array_append(moderators, $2)))) \
             WHERE id = $1 RETURNING *",
        )
        .bind(topic_id)
        .bind(requester)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve topic", e))?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = CASE WHEN role = $2 THEN $3 ELSE role END, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(requester)
        .bind(UserRole::User)
        .bind(UserRole::Moderator)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Requesting user no longer exists"),
            other => AppError::with_source(ErrorKind::Database, "Failed to promote user", other),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit approval", e)
        })?;

        Ok((topic, user))
    }

    /// Add a moderator to a topic (deduplicated).
    pub async fn add_moderator(&self, topic_id: Uuid, user_id: Uuid) -> AppResult<Topic> {
        let updated = sqlx::query_as::<_, Topic>(
            "UPDATE topics SET moderators = array_append(moderators, $2) \
             WHERE id = $1 AND NOT (moderators @> ARRAY[$2]) RETURNING *",
        )
        .bind(topic_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add moderator", e))?;

        match updated {
            Some(topic) => Ok(topic),
            // No row: either the topic is missing or the user already moderates it.
            None => self
                .find_by_id(topic_id)
                .await?
                .ok_or_else(|| AppError::not_found("Topic not found")),
        }
    }

    // ── Update requests ──────────────────────────────────────────

    /// File a proposed edit against a topic.
    pub async fn create_update_request(
        &self,
        topic_id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<TopicUpdateRequest> {
        sqlx::query_as::<_, TopicUpdateRequest>(
            "INSERT INTO topic_update_requests (topic_id, user_id, title, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(topic_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create update request", e)
        })
    }

    /// Find an update request belonging to a topic.
    pub async fn find_update_request(
        &self,
        topic_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<Option<TopicUpdateRequest>> {
        sqlx::query_as::<_, TopicUpdateRequest>(
            "SELECT * FROM topic_update_requests WHERE id = $1 AND topic_id = $2",
        )
        .bind(request_id)
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find update request", e)
        })
    }

    /// Approve an update request: apply the proposed fields to the topic and
    /// mark the request approved, in one transaction.
    pub async fn approve_update_request(
        &self,
        request: &TopicUpdateRequest,
    ) -> AppResult<Topic> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let topic = sqlx::query_as::<_, Topic>(
            "UPDATE topics SET title = COALESCE($2, title), \
             description = COALESCE($3, description) \
             WHERE id = $1 RETURNING *",
        )
        .bind(request.topic_id)
        .bind(&request.title)
        .bind(&request.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Topic not found"),
            other => AppError::with_source(ErrorKind::Database, "Failed to apply update", other),
        })?;

        sqlx::query("UPDATE topic_update_requests SET status = $2 WHERE id = $1")
            .bind(request.id)
            .bind(RequestStatus::Approved)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark request approved", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit update approval", e)
        })?;

        Ok(topic)
    }

    /// Mark an update request rejected.
    pub async fn reject_update_request(&self, request_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE topic_update_requests SET status = $2 WHERE id = $1")
            .bind(request_id)
            .bind(RequestStatus::Rejected)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reject update request", e)
            })?;
        Ok(())
    }

    // ── Delete requests ──────────────────────────────────────────

    /// File a deletion request against a topic.
    pub async fn create_delete_request(
        &self,
        topic_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<TopicDeleteRequest> {
        sqlx::query_as::<_, TopicDeleteRequest>(
            "INSERT INTO topic_delete_requests (topic_id, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(topic_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create delete request", e)
        })
    }

    /// Find a delete request belonging to a topic.
    pub async fn find_delete_request(
        &self,
        topic_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<Option<TopicDeleteRequest>> {
        sqlx::query_as::<_, TopicDeleteRequest>(
            "SELECT * FROM topic_delete_requests WHERE id = $1 AND topic_id = $2",
        )
        .bind(request_id)
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find delete request", e)
        })
    }

    /// Approve a delete request: the topic goes away (requests cascade).
    pub async fn approve_delete_request(&self, request: &TopicDeleteRequest) -> AppResult<()> {
        let removed = self.delete(request.topic_id).await?;
        if !removed {
            return Err(AppError::not_found("Topic not found"));
        }
        Ok(())
    }

    /// Mark a delete request rejected.
    pub async fn reject_delete_request(&self, request_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE topic_delete_requests SET status = $2 WHERE id = $1")
            .bind(request_id)
            .bind(RequestStatus::Rejected)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reject delete request", e)
            })?;
        Ok(())
    }
}
