//! Session token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A session token owned by a user.
///
/// Tokens exist only as members of their owning user's collection; insertion
/// order is issuance order. A token authenticates a request iff its signature
/// verifies, its embedded expiry has not passed, its exact string is present
/// in the owner's collection, and `revoked` is false.
///
/// Lifecycle: appended at login/registration, flipped to revoked on logout or
/// the shutdown sweep, physically removed only when the owner logs out of all
/// devices or the account itself is deleted. A revoked token never becomes
/// valid again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionToken {
    /// Row identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// The exact signed token string handed to the client.
    pub token: String,
    /// Whether this token has been revoked prior to its natural expiry.
    pub revoked: bool,
    /// Issuance time.
    pub created_at: DateTime<Utc>,
}

impl SessionToken {
    /// Whether this entry can still authenticate (the signature and expiry
    /// checks live in the validator; this covers only the stored flag).
    pub fn is_usable(&self) -> bool {
        !self.revoked
    }
}
