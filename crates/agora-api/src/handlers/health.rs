//! Health check handler.

use axum::Json;
use axum::extract::State;

use agora_database::connection;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let database = match connection::health_check(&state.db_pool).await {
        Ok(true) => "ok",
        _ => "unavailable",
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })))
}
