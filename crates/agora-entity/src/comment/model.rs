//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Comment body.
    pub content: String,
    /// The post this comment belongs to.
    pub post_id: Uuid,
    /// The comment author.
    pub author_id: Uuid,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// Soft-delete timestamp, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Users who reported this comment (deduplicated).
    pub reports: Vec<Uuid>,
}

impl Comment {
    /// Whether this comment has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the given user already reported this comment.
    pub fn is_reported_by(&self, user_id: Uuid) -> bool {
        self.reports.contains(&user_id)
    }
}

/// Data required to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Comment body.
    pub content: String,
    /// Target post.
    pub post_id: Uuid,
    /// Author.
    pub author_id: Uuid,
}
