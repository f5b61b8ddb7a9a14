//! Topic service — creation, approval workflow, moderation request queues,
//! and moderator assignment.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_auth::access::AccessGate;
use agora_core::error::AppError;
use agora_database::repositories::category::CategoryRepository;
use agora_database::repositories::topic::TopicRepository;
use agora_entity::topic::{CreateTopic, RequestStatus, Topic, TopicDeleteRequest, TopicUpdateRequest};
use agora_entity::user::User;

use crate::context::RequestContext;

/// A reviewer's decision on a moderation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Apply the request.
    Approve,
    /// Decline the request, keeping the record.
    Reject,
}

impl FromStr for ReviewAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            _ => Err(AppError::validation(
                "Action must be 'approve' or 'reject'",
            )),
        }
    }
}

/// Handles topic lifecycle and the approval workflows around it.
#[derive(Debug, Clone)]
pub struct TopicService {
    /// Topic repository.
    topic_repo: Arc<TopicRepository>,
    /// Category repository (existence checks).
    category_repo: Arc<CategoryRepository>,
    /// Access gate.
    gate: Arc<AccessGate>,
}

impl TopicService {
    /// Creates a new topic service.
    pub fn new(
        topic_repo: Arc<TopicRepository>,
        category_repo: Arc<CategoryRepository>,
        gate: Arc<AccessGate>,
    ) -> Self {
        Self {
            topic_repo,
            category_repo,
            gate,
        }
    }

    /// Lists approved topics.
    pub async fn list(&self) -> Result<Vec<Topic>, AppError> {
        self.topic_repo.find_all().await
    }

    /// Fetches one topic.
    pub async fn get(&self, id: Uuid) -> Result<Topic, AppError> {
        self.topic_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Topic not found"))
    }

    /// Creates a topic outright. Admin only; the admin becomes author and
    /// first moderator.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title: String,
        description: Option<String>,
        category_id: Uuid,
    ) -> Result<Topic, AppError> {
        self.gate.require_admin(&ctx.role)?;
        self.ensure_category(category_id).await?;
        validate_title(&title)?;

        let topic = self
            .topic_repo
            .create(&CreateTopic {
                title,
                description,
                category_id,
                author_id: ctx.user_id,
                requested_by: None,
            })
            .await?;

        info!(admin_id = %ctx.user_id, topic_id = %topic.id, "Topic created");
        Ok(topic)
    }

    /// Files a topic creation request awaiting admin approval.
    pub async fn request_create(
        &self,
        ctx: &RequestContext,
        title: String,
        description: Option<String>,
        category_id: Uuid,
    ) -> Result<Topic, AppError> {
        self.ensure_category(category_id).await?;
        validate_title(&title)?;

        let topic = self
            .topic_repo
            .create(&CreateTopic {
                title,
                description,
                category_id,
                author_id: ctx.user_id,
                requested_by: Some(ctx.user_id),
            })
            .await?;

        info!(user_id = %ctx.user_id, topic_id = %topic.id, "Topic creation requested");
        Ok(topic)
    }

    /// Lists pending topic creation requests. Admin only.
    pub async fn list_pending_requests(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Topic>, AppError> {
        self.gate.require_admin(&ctx.role)?;
        self.topic_repo.find_pending_requests().await
    }

    /// Approves a pending topic creation request. Admin only.
    ///
    /// The requester becomes author and moderator of the topic, and is
    /// promoted user→moderator; both writes land in one transaction.
    pub async fn approve_request(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
    ) -> Result<(Topic, User), AppError> {
        self.gate.require_admin(&ctx.role)?;

        let (topic, user) = self.topic_repo.approve_request(topic_id).await?;

        info!(
            admin_id = %ctx.user_id,
            topic_id = %topic.id,
            user_id = %user.id,
            role = %user.role,
            "Topic request approved"
        );

        Ok((topic, user))
    }

    /// Adds a moderator to a topic. Only existing topic moderators may
    /// assign new ones.
    pub async fn add_moderator(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
        user_id: Uuid,
    ) -> Result<Topic, AppError> {
        let topic = self.get(topic_id).await?;

        if !topic.is_moderated_by(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::forbidden(
                "Only moderators of this topic can assign other moderators",
            ));
        }

        let topic = self.topic_repo.add_moderator(topic_id, user_id).await?;
        info!(topic_id = %topic_id, user_id = %user_id, "Moderator added to topic");
        Ok(topic)
    }

    // ── Update requests ──────────────────────────────────────────

    /// Files a proposed edit to a topic.
    pub async fn submit_update_request(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<TopicUpdateRequest, AppError> {
        self.get(topic_id).await?;

        if title.is_none() && description.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        self.topic_repo
            .create_update_request(topic_id, ctx.user_id, title.as_deref(), description.as_deref())
            .await
    }

    /// Approves or rejects an update request. Restricted to topic
    /// moderators, global moderators, and admins.
    pub async fn resolve_update_request(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
        request_id: Uuid,
        action: ReviewAction,
    ) -> Result<Topic, AppError> {
        let topic = self.get(topic_id).await?;
        self.ensure_can_moderate(ctx, &topic)?;

        let request = self
            .topic_repo
            .find_update_request(topic_id, request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Update request not found"))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::conflict("Request has already been resolved"));
        }

        match action {
            ReviewAction::Approve => {
                let topic = self.topic_repo.approve_update_request(&request).await?;
                info!(topic_id = %topic_id, request_id = %request_id, "Update request approved");
                Ok(topic)
            }
            ReviewAction::Reject => {
                self.topic_repo.reject_update_request(request_id).await?;
                info!(topic_id = %topic_id, request_id = %request_id, "Update request rejected");
                self.get(topic_id).await
            }
        }
    }

    // ── Delete requests ──────────────────────────────────────────

    /// Files a topic deletion request.
    pub async fn submit_delete_request(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
    ) -> Result<TopicDeleteRequest, AppError> {
        self.get(topic_id).await?;
        self.topic_repo
            .create_delete_request(topic_id, ctx.user_id)
            .await
    }

    /// Approves or rejects a deletion request. Approval removes the topic.
    pub async fn resolve_delete_request(
        &self,
        ctx: &RequestContext,
        topic_id: Uuid,
        request_id: Uuid,
        action: ReviewAction,
    ) -> Result<(), AppError> {
        let topic = self.get(topic_id).await?;
        self.ensure_can_moderate(ctx, &topic)?;

        let request = self
            .topic_repo
            .find_delete_request(topic_id, request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Delete request not found"))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::conflict("Request has already been resolved"));
        }

        match action {
            ReviewAction::Approve => {
                self.topic_repo.approve_delete_request(&request).await?;
                info!(topic_id = %topic_id, request_id = %request_id, "Topic deleted via request");
            }
            ReviewAction::Reject => {
                self.topic_repo.reject_delete_request(request_id).await?;
                info!(topic_id = %topic_id, request_id = %request_id, "Delete request rejected");
            }
        }

        Ok(())
    }

    /// Checks that the actor may moderate this topic: topic moderator,
    /// global moderator, or admin.
    fn ensure_can_moderate(&self, ctx: &RequestContext, topic: &Topic) -> Result<(), AppError> {
        if topic.is_moderated_by(ctx.user_id) {
            return Ok(());
        }
        self.gate.require_moderator(&ctx.role)
    }

    async fn ensure_category(&self, category_id: Uuid) -> Result<(), AppError> {
        self.category_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_action_parsing() {
        assert_eq!("approve".parse::<ReviewAction>().unwrap(), ReviewAction::Approve);
        assert_eq!("REJECT".parse::<ReviewAction>().unwrap(), ReviewAction::Reject);
        assert!("maybe".parse::<ReviewAction>().is_err());
    }
}
