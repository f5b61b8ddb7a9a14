//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use agora_auth::session::TokenValidator;
use agora_core::config::AppConfig;
use agora_service::category::CategoryService;
use agora_service::comment::CommentService;
use agora_service::post::PostService;
use agora_service::topic::TopicService;
use agora_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Inbound token validation.
    pub token_validator: Arc<TokenValidator>,
    /// Account flows.
    pub user_service: Arc<UserService>,
    /// Category management.
    pub category_service: Arc<CategoryService>,
    /// Topic management and approval workflows.
    pub topic_service: Arc<TopicService>,
    /// Post management.
    pub post_service: Arc<PostService>,
    /// Comment management.
    pub comment_service: Arc<CommentService>,
}
