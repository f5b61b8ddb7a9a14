//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body. Login is by email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A password change pair inside a profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    /// Current password.
    pub current: String,
    /// New password.
    pub new: String,
}

/// Profile update request — named optional fields only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// Password change pair.
    pub password: Option<PasswordChangeRequest>,
}

/// Admin role assignment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetRoleRequest {
    /// Target role name: "admin", "moderator", or "user".
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Update category request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Create (or request) a topic.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTopicRequest {
    /// Topic title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning category.
    pub category_id: Uuid,
}

/// Propose an edit to a topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicUpdateRequestBody {
    /// Proposed title.
    pub title: Option<String>,
    /// Proposed description.
    pub description: Option<String>,
}

/// Resolve a moderation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewActionRequest {
    /// "approve" or "reject".
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

/// Add a moderator to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddModeratorRequest {
    /// The user to add.
    pub user_id: Uuid,
}

/// Create post request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Post body.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    /// Owning topic.
    pub topic_id: Uuid,
}

/// Update post request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
}

/// Create comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Target post.
    pub post_id: Uuid,
    /// Comment body.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Update comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    /// New content.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}
