//! Topic handlers — CRUD plus the approval and moderation request flows.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use agora_core::error::AppError;
use agora_entity::post::Post;
use agora_entity::topic::{Topic, TopicDeleteRequest, TopicUpdateRequest};
use agora_service::topic::ReviewAction;

use crate::dto::request::{
    AddModeratorRequest, CreateTopicRequest, ReviewActionRequest, TopicUpdateRequestBody,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Response for an approved topic request: the topic plus the promoted user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApprovalResponse {
    /// The approved topic.
    pub topic: Topic,
    /// The requester, possibly with a fresh moderator role.
    pub user: UserResponse,
}

/// GET /api/topics
pub async fn list_topics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Topic>>>, ApiError> {
    let topics = state.topic_service.list().await?;
    Ok(Json(ApiResponse::ok(topics)))
}

/// GET /api/topics/{id}
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Topic>>, ApiError> {
    let topic = state.topic_service.get(id).await?;
    Ok(Json(ApiResponse::ok(topic)))
}

/// GET /api/topics/{id}/posts
pub async fn list_topic_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Post>>>, ApiError> {
    state.topic_service.get(id).await?;
    let posts = state.post_service.list_by_topic(id).await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// POST /api/topics — admin only.
pub async fn create_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Topic>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let topic = state
        .topic_service
        .create(auth.context(), req.title, req.description, req.category_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(topic))))
}

/// POST /api/topics/request — file a creation request.
pub async fn request_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Topic>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let topic = state
        .topic_service
        .request_create(auth.context(), req.title, req.description, req.category_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(topic))))
}

/// GET /api/topics/requests — pending creation requests, admin only.
pub async fn list_pending_topics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Topic>>>, ApiError> {
    let topics = state
        .topic_service
        .list_pending_requests(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(topics)))
}

/// POST /api/topics/{id}/approve — admin only; promotes the requester.
pub async fn approve_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApprovalResponse>>, ApiError> {
    let (topic, user) = state.topic_service.approve_request(auth.context(), id).await?;

    Ok(Json(ApiResponse::ok(ApprovalResponse {
        topic,
        user: UserResponse::from(&user),
    })))
}

/// POST /api/topics/{id}/moderators — topic moderators only.
pub async fn add_moderator(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AddModeratorRequest>,
) -> Result<Json<ApiResponse<Topic>>, ApiError> {
    let topic = state
        .topic_service
        .add_moderator(auth.context(), id, req.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(topic)))
}

/// POST /api/topics/{id}/update-requests
pub async fn submit_update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TopicUpdateRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<TopicUpdateRequest>>), ApiError> {
    let request = state
        .topic_service
        .submit_update_request(auth.context(), id, req.title, req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// POST /api/topics/{id}/update-requests/{rid} — approve or reject.
pub async fn resolve_update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, rid)): Path<(Uuid, Uuid)>,
    Json(req): Json<ReviewActionRequest>,
) -> Result<Json<ApiResponse<Topic>>, ApiError> {
    let action = ReviewAction::from_str(&req.action)?;
    let topic = state
        .topic_service
        .resolve_update_request(auth.context(), id, rid, action)
        .await?;
    Ok(Json(ApiResponse::ok(topic)))
}

/// POST /api/topics/{id}/delete-requests
pub async fn submit_delete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<TopicDeleteRequest>>), ApiError> {
    let request = state
        .topic_service
        .submit_delete_request(auth.context(), id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// POST /api/topics/{id}/delete-requests/{rid} — approve or reject.
pub async fn resolve_delete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, rid)): Path<(Uuid, Uuid)>,
    Json(req): Json<ReviewActionRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let action = ReviewAction::from_str(&req.action)?;
    state
        .topic_service
        .resolve_delete_request(auth.context(), id, rid, action)
        .await?;

    let message = match action {
        ReviewAction::Approve => "Topic deleted successfully",
        ReviewAction::Reject => "Delete request rejected",
    };

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: message.to_string(),
    })))
}
