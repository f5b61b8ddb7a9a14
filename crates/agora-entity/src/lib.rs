//! # agora-entity
//!
//! Domain entity models for the Agora forum backend.
//!
//! ## Modules
//!
//! - `user` — user accounts and roles
//! - `session` — per-user session tokens
//! - `category` — top-level discussion categories
//! - `topic` — topics within a category, with moderation request queues
//! - `post` — posts within a topic
//! - `comment` — comments on posts

pub mod category;
pub mod comment;
pub mod post;
pub mod session;
pub mod topic;
pub mod user;

pub use category::Category;
pub use comment::Comment;
pub use post::Post;
pub use session::SessionToken;
pub use topic::{RequestStatus, Topic, TopicDeleteRequest, TopicUpdateRequest};
pub use user::{User, UserRole};
