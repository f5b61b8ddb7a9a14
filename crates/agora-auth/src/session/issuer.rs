//! Session token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use agora_core::error::AppError;
use agora_database::repositories::token::TokenRepository;
use agora_entity::user::User;

use crate::jwt::JwtEncoder;

/// A freshly minted session token with its validity window.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed token string.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Mints signed session tokens and records them against the owning user.
///
/// Issuance is replace-on-issue: the user's token collection is swapped for
/// the single fresh token, so each user has one active session and a second
/// login supersedes the first. The swap is transactional — a failed write
/// leaves the previous collection untouched.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    /// JWT signer.
    encoder: Arc<JwtEncoder>,
    /// Token collection persistence.
    token_repo: Arc<TokenRepository>,
}

impl TokenIssuer {
    /// Creates a new token issuer.
    pub fn new(encoder: Arc<JwtEncoder>, token_repo: Arc<TokenRepository>) -> Self {
        Self {
            encoder,
            token_repo,
        }
    }

    /// Issues a session token for the given user.
    ///
    /// The caller sees only a generic failure; signing and storage details
    /// stay in the log.
    pub async fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let (token, expires_at) = self.encoder.sign(user).map_err(|e| {
            error!(user_id = %user.id, error = %e, "Token signing failed");
            AppError::internal("Failed to sign in")
        })?;

        self.token_repo
            .replace_for_user(user.id, &token)
            .await
            .map_err(|e| {
                error!(user_id = %user.id, error = %e, "Token persistence failed");
                AppError::internal("Failed to sign in")
            })?;

        info!(user_id = %user.id, expires_at = %expires_at, "Session token issued");

        Ok(IssuedToken { token, expires_at })
    }
}
