//! Topic moderation request entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status of a moderation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted and applied.
    Approved,
    /// Declined; the request record is kept.
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RequestStatus {
    type Err = agora_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(agora_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}

/// A proposed edit to a topic, awaiting moderator review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicUpdateRequest {
    /// Request identifier.
    pub id: Uuid,
    /// The topic the request targets.
    pub topic_id: Uuid,
    /// Who proposed the edit.
    pub user_id: Uuid,
    /// Proposed title, if changed.
    pub title: Option<String>,
    /// Proposed description, if changed.
    pub description: Option<String>,
    /// Review status.
    pub status: RequestStatus,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
}

/// A request to delete a topic, awaiting moderator review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicDeleteRequest {
    /// Request identifier.
    pub id: Uuid,
    /// The topic the request targets.
    pub topic_id: Uuid,
    /// Who filed the request.
    pub user_id: Uuid,
    /// Review status.
    pub status: RequestStatus,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in ["pending", "approved", "rejected"] {
            assert_eq!(s.parse::<RequestStatus>().unwrap().to_string(), s);
        }
        assert!("cancelled".parse::<RequestStatus>().is_err());
    }
}
