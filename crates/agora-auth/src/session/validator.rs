//! Inbound session token validation.

use std::sync::Arc;

use tracing::debug;

use agora_core::error::AppError;
use agora_database::repositories::token::TokenRepository;
use agora_database::repositories::user::UserRepository;
use agora_entity::user::User;

use crate::jwt::JwtDecoder;
use crate::jwt::decoder::AUTH_REQUIRED;

/// Validates inbound session tokens against the credential store.
///
/// A token authenticates a request iff, in order:
/// 1. the string is non-empty,
/// 2. its signature verifies and it is unexpired,
/// 3. its exact string is present in the owning user's collection,
/// 4. that entry's revoked flag is false.
///
/// Every rejection surfaces the same unauthorized error so callers cannot
/// distinguish expired from revoked from forged tokens. Validation is
/// read-only.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    /// Signature/expiry verification.
    decoder: Arc<JwtDecoder>,
    /// Token collection reads.
    token_repo: Arc<TokenRepository>,
    /// User lookups.
    user_repo: Arc<UserRepository>,
}

impl TokenValidator {
    /// Creates a new token validator.
    pub fn new(
        decoder: Arc<JwtDecoder>,
        token_repo: Arc<TokenRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            decoder,
            token_repo,
            user_repo,
        }
    }

    /// Validates a token string and resolves the authenticated user.
    ///
    /// On success the returned identity carries the user's *current* role
    /// from the store, not the role frozen into the claim at issuance.
    pub async fn validate(&self, token: &str) -> Result<User, AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized(AUTH_REQUIRED));
        }

        let claims = self.decoder.decode(token)?;

        let entry = self
            .token_repo
            .find_by_token(token)
            .await
            .map_err(|_| AppError::unauthorized(AUTH_REQUIRED))?
            .ok_or_else(|| {
                debug!(user_id = %claims.sub, "Token not present in any collection");
                AppError::unauthorized(AUTH_REQUIRED)
            })?;

        if entry.revoked || entry.user_id != claims.sub {
            debug!(user_id = %claims.sub, "Token revoked or owner mismatch");
            return Err(AppError::unauthorized(AUTH_REQUIRED));
        }

        let user = self
            .user_repo
            .find_by_id(entry.user_id)
            .await
            .map_err(|_| AppError::unauthorized(AUTH_REQUIRED))?
            .ok_or_else(|| AppError::unauthorized(AUTH_REQUIRED))?;

        Ok(user)
    }
}
