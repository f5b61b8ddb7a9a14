//! Comment handlers — CRUD, soft/hard deletion, and reporting.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use agora_core::error::AppError;
use agora_entity::comment::Comment;

use crate::dto::request::{CreateCommentRequest, UpdateCommentRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/comments
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, ApiError> {
    let comments = state.comment_service.list().await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// GET /api/comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let comment = state.comment_service.get(id).await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let comment = state
        .comment_service
        .create(auth.context(), req.post_id, req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// PATCH /api/comments/{id} — author only.
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let comment = state
        .comment_service
        .update(auth.context(), id, req.content)
        .await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}/soft — author only.
pub async fn soft_delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let comment = state
        .comment_service
        .soft_delete(auth.context(), id)
        .await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}/hard — moderator or admin.
pub async fn hard_delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .comment_service
        .hard_delete(auth.context(), id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Comment deleted successfully".to_string(),
    })))
}

/// POST /api/comments/{id}/report
pub async fn report_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let comment = state.comment_service.report(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(comment)))
}
