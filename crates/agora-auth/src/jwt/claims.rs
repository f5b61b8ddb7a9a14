//! JWT claims structure embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_entity::user::UserRole;

/// Claims payload embedded in a session token.
///
/// The role is captured at issuance time; the validator re-reads the current
/// role from the store, so a stale claim never grants stale privileges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Username for convenience.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_exp(exp: i64) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            role: UserRole::User,
            username: "alice".to_string(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_expiry_in_past() {
        assert!(claims_with_exp(Utc::now().timestamp() - 60).is_expired());
    }

    #[test]
    fn test_expiry_in_future() {
        assert!(!claims_with_exp(Utc::now().timestamp() + 3600).is_expired());
    }
}
