//! Session token revocation.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_core::error::AppError;
use agora_database::repositories::token::TokenRepository;

/// Marks issued tokens as revoked ahead of their natural expiry.
///
/// Both operations are idempotent: revoking an already-revoked collection
/// touches no rows and succeeds.
#[derive(Debug, Clone)]
pub struct RevocationManager {
    /// Token collection persistence.
    token_repo: Arc<TokenRepository>,
}

impl RevocationManager {
    /// Creates a new revocation manager.
    pub fn new(token_repo: Arc<TokenRepository>) -> Self {
        Self { token_repo }
    }

    /// Revokes every token issued to one user. Used on logout.
    ///
    /// After this call every previously issued token for the user fails
    /// validation.
    pub async fn revoke_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let revoked = self.token_repo.revoke_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "User tokens revoked");
        Ok(())
    }

    /// Revokes every token of every user. Invoked once from the shutdown
    /// sequence; the caller bounds it with a grace period.
    pub async fn revoke_all(&self) -> Result<u64, AppError> {
        let revoked = self.token_repo.revoke_all().await?;
        info!(revoked, "All session tokens revoked");
        Ok(revoked)
    }

    /// Physically clears a user's collection ("log out of all devices").
    pub async fn purge_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let removed = self.token_repo.delete_for_user(user_id).await?;
        info!(user_id = %user_id, removed, "User token collection cleared");
        Ok(())
    }
}
