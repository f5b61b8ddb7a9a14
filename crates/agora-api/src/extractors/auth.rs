//! `AuthUser` extractor — pulls the session token from the request,
//! validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use agora_auth::jwt::decoder::AUTH_REQUIRED;
use agora_core::error::AppError;
use agora_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Extracted authenticated user context available in handlers.
///
/// The token is accepted from either an `Authorization: Bearer` header or
/// the `token` cookie — different client revisions use either transport.
/// The header wins when both are present.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::from(AppError::unauthorized(AUTH_REQUIRED)))?;

        let user = state.token_validator.validate(&token).await?;

        Ok(AuthUser(RequestContext::from_user(&user)))
    }
}

/// Pulls the token string from the bearer header or the session cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from);

    if bearer.is_some() {
        return bearer;
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(TOKEN_COOKIE).map(|c| c.value().to_string())
}
