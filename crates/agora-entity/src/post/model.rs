//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A post within a topic.
///
/// Soft deletion sets `deleted_at` without removing the row; soft-deleted
/// posts are invisible to reads. A closed post accepts no new comments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// The topic this post belongs to.
    pub topic_id: Uuid,
    /// The post author.
    pub author_id: Uuid,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// Soft-delete timestamp, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Users who reported this post (deduplicated).
    pub reports: Vec<Uuid>,
    /// Whether commenting is closed.
    pub closed: bool,
}

impl Post {
    /// Whether this post has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the given user already reported this post.
    pub fn is_reported_by(&self, user_id: Uuid) -> bool {
        self.reports.contains(&user_id)
    }
}

/// Data required to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Owning topic.
    pub topic_id: Uuid,
    /// Author.
    pub author_id: Uuid,
}
