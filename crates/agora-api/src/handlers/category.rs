//! Category handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use agora_core::error::AppError;
use agora_entity::category::{Category, CreateCategory};

use crate::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.category_service.list().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.category_service.get(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories — admin only.
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let category = state
        .category_service
        .create(
            auth.context(),
            CreateCategory {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PATCH /api/categories/{id} — admin only.
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state
        .category_service
        .update(auth.context(), id, req.name, req.description)
        .await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id} — admin only.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.category_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Category deleted".to_string(),
    })))
}
