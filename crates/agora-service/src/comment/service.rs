//! Comment service — creation on open posts, editing, soft/hard deletion,
//! and reporting.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_auth::access::AccessGate;
use agora_core::error::AppError;
use agora_database::repositories::comment::CommentRepository;
use agora_database::repositories::post::PostRepository;
use agora_entity::comment::{Comment, CreateComment};

use crate::context::RequestContext;

/// Handles comment lifecycle and moderation actions.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment repository.
    comment_repo: Arc<CommentRepository>,
    /// Post repository (existence and closed checks).
    post_repo: Arc<PostRepository>,
    /// Access gate.
    gate: Arc<AccessGate>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<CommentRepository>,
        post_repo: Arc<PostRepository>,
        gate: Arc<AccessGate>,
    ) -> Self {
        Self {
            comment_repo,
            post_repo,
            gate,
        }
    }

    /// Lists all visible comments.
    pub async fn list(&self) -> Result<Vec<Comment>, AppError> {
        self.comment_repo.find_all().await
    }

    /// Lists visible comments on one post.
    pub async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, AppError> {
        self.comment_repo.find_by_post(post_id).await
    }

    /// Fetches one visible comment.
    pub async fn get(&self, id: Uuid) -> Result<Comment, AppError> {
        self.comment_repo
            .find_visible_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    /// Creates a comment on a post. The post must exist, be visible, and
    /// not be closed.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Content is required"));
        }

        let post = self
            .post_repo
            .find_visible_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        if post.closed {
            return Err(AppError::forbidden("Comments are closed for this post"));
        }

        let comment = self
            .comment_repo
            .create(&CreateComment {
                content,
                post_id,
                author_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    /// Edits a comment. Author only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        content: String,
    ) -> Result<Comment, AppError> {
        let comment = self.get(id).await?;
        self.gate
            .require_owner(&ctx.role, ctx.user_id, comment.author_id)?;

        self.comment_repo.update(id, &content).await
    }

    /// Soft-deletes a comment. Author only.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Comment, AppError> {
        let comment = self.get(id).await?;
        self.gate
            .require_owner(&ctx.role, ctx.user_id, comment.author_id)?;

        let comment = self.comment_repo.soft_delete(id).await?;
        info!(user_id = %ctx.user_id, comment_id = %id, "Comment soft-deleted");
        Ok(comment)
    }

    /// Hard-deletes a comment. Moderator or admin only.
    pub async fn hard_delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.comment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;
        self.gate.require_moderator(&ctx.role)?;

        self.comment_repo.hard_delete(id).await?;
        info!(user_id = %ctx.user_id, comment_id = %id, "Comment hard-deleted");
        Ok(())
    }

    /// Reports a comment. Repeat reports from the same user are ignored.
    pub async fn report(&self, ctx: &RequestContext, id: Uuid) -> Result<Comment, AppError> {
        self.get(id).await?;
        self.comment_repo.add_report(id, ctx.user_id).await
    }
}
