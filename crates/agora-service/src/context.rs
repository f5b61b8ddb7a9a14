//! Request context carrying the authenticated user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer after token validation and passed into service
/// methods so that every operation knows *who* is acting. The role is the
/// user's current role from the store, not the one frozen into the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The username.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Builds a context from a validated user entity.
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.username.clone())
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is at least a moderator.
    pub fn is_moderator_or_above(&self) -> bool {
        self.role.is_moderator_or_above()
    }
}
