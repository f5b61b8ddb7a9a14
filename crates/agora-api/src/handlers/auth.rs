//! Auth handlers — register, login, logout.
//!
//! Successful register/login responses set the session cookie alongside the
//! JSON body so both cookie and bearer clients stay in sync; logout clears
//! the cookie and revokes the collection server-side.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use agora_auth::session::IssuedToken;
use agora_core::error::AppError;
use agora_service::user::RegisterRequest as RegisterData;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::extractors::auth::{AuthUser, TOKEN_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, issued) = state
        .user_service
        .register(RegisterData {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = jar.add(session_cookie(&state, &issued));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::ok(AuthResponse {
            user: UserResponse::from(&user),
            token: issued.token,
            expires_at: issued.expires_at,
        })),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, issued) = state.user_service.login(&req.email, &req.password).await?;

    let jar = jar.add(session_cookie(&state, &issued));

    Ok((
        jar,
        Json(ApiResponse::ok(AuthResponse {
            user: UserResponse::from(&user),
            token: issued.token,
            expires_at: issued.expires_at,
        })),
    ))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.user_service.logout(auth.context()).await?;

    let jar = jar.remove(expired_cookie());

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Successfully logged out".to_string(),
        })),
    ))
}

/// POST /api/logout/all — clears the token collection outright.
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.user_service.logout_all(auth.context()).await?;

    let jar = jar.remove(expired_cookie());

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out of all devices".to_string(),
        })),
    ))
}

/// Builds the session cookie carrying the issued token.
fn session_cookie(state: &AppState, issued: &IssuedToken) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.config.server.secure_cookies)
        .build()
}

/// A removal cookie matching the session cookie's path.
fn expired_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, "")).path("/").build()
}
