//! Post handlers — CRUD, soft/hard deletion, reporting, and closing.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use agora_core::error::AppError;
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::comment::Comment;
use agora_entity::post::Post;

use crate::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<Post>>>, ApiError> {
    let posts = state.post_service.list(&page).await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.get(id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// GET /api/posts/{id}/comments
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, ApiError> {
    state.post_service.get(id).await?;
    let comments = state.comment_service.list_by_post(id).await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let post = state
        .post_service
        .create(auth.context(), req.title, req.content, req.topic_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// PATCH /api/posts/{id} — author only.
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .post_service
        .update(auth.context(), id, req.title, req.content)
        .await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}/soft — author, moderator, or admin.
pub async fn soft_delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.soft_delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}/hard — author, moderator, or admin.
pub async fn hard_delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.post_service.hard_delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Post deleted successfully".to_string(),
    })))
}

/// POST /api/posts/{id}/report
pub async fn report_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.report(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// POST /api/posts/{id}/close — author, moderator, or admin.
pub async fn close_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.close(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(post)))
}
