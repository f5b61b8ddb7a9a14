//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the forum.
///
/// Roles are ordered by privilege level: Admin > Moderator > User.
/// The only automatic transition is user→moderator via the topic-approval
/// flow; all other changes are made directly by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Can close posts and hard-delete others' posts and comments.
    Moderator,
    /// Regular registered user.
    User,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Moderator => 2,
            Self::User => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a moderator or higher.
    pub fn is_moderator_or_above(&self) -> bool {
        self.has_at_least(&Self::Moderator)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = agora_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "user" => Ok(Self::User),
            _ => Err(agora_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, moderator, user"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::User));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Moderator.has_at_least(&UserRole::User));
        assert!(!UserRole::User.has_at_least(&UserRole::Moderator));
    }

    #[test]
    fn test_moderator_or_above() {
        assert!(UserRole::Admin.is_moderator_or_above());
        assert!(UserRole::Moderator.is_moderator_or_above());
        assert!(!UserRole::User.is_moderator_or_above());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("MODERATOR".parse::<UserRole>().unwrap(), UserRole::Moderator);
        assert!("invalid".parse::<UserRole>().is_err());
    }
}
