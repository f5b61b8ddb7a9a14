//! Post service — creation, editing, soft/hard deletion, reporting, and
//! closing posts to comments.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_auth::access::AccessGate;
use agora_core::error::AppError;
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_database::repositories::post::PostRepository;
use agora_database::repositories::topic::TopicRepository;
use agora_entity::post::{CreatePost, Post};

use crate::context::RequestContext;

/// Handles post lifecycle and moderation actions.
#[derive(Debug, Clone)]
pub struct PostService {
    /// Post repository.
    post_repo: Arc<PostRepository>,
    /// Topic repository (existence checks).
    topic_repo: Arc<TopicRepository>,
    /// Access gate.
    gate: Arc<AccessGate>,
}

impl PostService {
    /// Creates a new post service.
    pub fn new(
        post_repo: Arc<PostRepository>,
        topic_repo: Arc<TopicRepository>,
        gate: Arc<AccessGate>,
    ) -> Self {
        Self {
            post_repo,
            topic_repo,
            gate,
        }
    }

    /// Lists visible posts.
    pub async fn list(&self, page: &PageRequest) -> Result<PageResponse<Post>, AppError> {
        self.post_repo.find_all(page).await
    }

    /// Lists visible posts within one topic.
    pub async fn list_by_topic(&self, topic_id: Uuid) -> Result<Vec<Post>, AppError> {
        self.post_repo.find_by_topic(topic_id).await
    }

    /// Fetches one visible post. Soft-deleted posts read as absent.
    pub async fn get(&self, id: Uuid) -> Result<Post, AppError> {
        self.post_repo
            .find_visible_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    /// Creates a post in a topic.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title: String,
        content: String,
        topic_id: Uuid,
    ) -> Result<Post, AppError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::validation("Title and content are required"));
        }

        self.topic_repo
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| AppError::not_found("Topic not found"))?;

        let post = self
            .post_repo
            .create(&CreatePost {
                title,
                content,
                topic_id,
                author_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Edits a post. Author only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, AppError> {
        let post = self.get(id).await?;
        self.gate
            .require_owner(&ctx.role, ctx.user_id, post.author_id)?;

        self.post_repo
            .update(id, title.as_deref(), content.as_deref())
            .await
    }

    /// Soft-deletes a post. Author, moderator, or admin.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Post, AppError> {
        let post = self.get(id).await?;
        self.gate
            .require_moderator_or_author(&ctx.role, ctx.user_id, post.author_id)?;

        let post = self.post_repo.soft_delete(id).await?;
        info!(user_id = %ctx.user_id, post_id = %id, "Post soft-deleted");
        Ok(post)
    }

    /// Hard-deletes a post. Author, moderator, or admin. Comments cascade.
    pub async fn hard_delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;
        self.gate
            .require_moderator_or_author(&ctx.role, ctx.user_id, post.author_id)?;

        self.post_repo.hard_delete(id).await?;
        info!(user_id = %ctx.user_id, post_id = %id, "Post hard-deleted");
        Ok(())
    }

    /// Reports a post. Repeat reports from the same user are ignored.
    pub async fn report(&self, ctx: &RequestContext, id: Uuid) -> Result<Post, AppError> {
        self.get(id).await?;
        self.post_repo.add_report(id, ctx.user_id).await
    }

    /// Closes a post to further comments. Author, moderator, or admin.
    pub async fn close(&self, ctx: &RequestContext, id: Uuid) -> Result<Post, AppError> {
        let post = self.get(id).await?;
        self.gate
            .require_moderator_or_author(&ctx.role, ctx.user_id, post.author_id)?;

        let post = self.post_repo.close(id).await?;
        info!(user_id = %ctx.user_id, post_id = %id, "Post closed");
        Ok(post)
    }
}
