//! Topic entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A topic of discussion within a category.
///
/// A topic may start life as a pending creation request (`requested_by`
/// set, awaiting admin approval). Approval installs the requester as the
/// author and first moderator, and promotes them to the moderator role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    /// Unique topic identifier.
    pub id: Uuid,
    /// Topic title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// The category this topic belongs to.
    pub category_id: Uuid,
    /// The topic author.
    pub author_id: Uuid,
    /// The user awaiting approval for this topic, if any.
    pub requested_by: Option<Uuid>,
    /// Users who moderate this topic.
    pub moderators: Vec<Uuid>,
    /// When the topic was created.
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Whether this topic is an unapproved creation request.
    pub fn is_pending_request(&self) -> bool {
        self.requested_by.is_some()
    }

    /// Whether the given user moderates this topic.
    pub fn is_moderated_by(&self, user_id: Uuid) -> bool {
        self.moderators.contains(&user_id)
    }
}

/// Data required to create a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTopic {
    /// Topic title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning category.
    pub category_id: Uuid,
    /// Author (set immediately for admin creation, or on approval for
    /// requested topics).
    pub author_id: Uuid,
    /// Requesting user for the approval flow.
    pub requested_by: Option<Uuid>,
}
