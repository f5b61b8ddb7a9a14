//! User handlers — self-service profile operations and admin management.

use axum::Json;
use axum::extract::{Path, Query, State};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use agora_core::error::AppError;
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::user::{User, UserRole};
use agora_service::user::{PasswordChange, UpdateProfile};

use crate::dto::request::{SetRoleRequest, UpdateProfileRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PATCH /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let update = UpdateProfile {
        username: req.username,
        email: req.email,
        password: req.password.map(|p| PasswordChange {
            current: p.current,
            new: p.new,
        }),
    };

    let user = state
        .user_service
        .update_profile(auth.context(), update)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// DELETE /api/users/me
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.delete_account(auth.context()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deleted".to_string(),
    })))
}

/// GET /api/users — admin only.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let users = state.user_service.list_users(auth.context(), &page).await?;

    let items: Vec<UserResponse> = users.items.iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::ok(PageResponse::new(
        items,
        users.page,
        users.page_size,
        users.total_items,
    ))))
}

/// GET /api/users/{id} — admin only.
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user: User = state.user_service.get_user(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PATCH /api/users/{id} — admin role assignment.
pub async fn set_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = UserRole::from_str(&req.role)?;
    let user = state.user_service.set_role(auth.context(), id, role).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// DELETE /api/users/{id} — admin only.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.delete_user(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deleted".to_string(),
    })))
}
