//! The access-control gate — authorization checks applied after
//! authentication has already succeeded.

use uuid::Uuid;

use agora_core::error::AppError;
use agora_entity::user::UserRole;

/// Enforces role and ownership rules for protected operations.
///
/// Authentication rejections are `Unauthorized` (401) and come from the
/// token validator; everything here rejects with `Forbidden` (403), a
/// deliberately distinct kind.
#[derive(Debug, Clone, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Creates a new gate.
    pub fn new() -> Self {
        Self
    }

    /// Admin-only operations: category management, user administration,
    /// direct role assignment.
    pub fn require_admin(&self, role: &UserRole) -> Result<(), AppError> {
        if role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator access required"))
        }
    }

    /// Moderator-or-author operations: closing a post, soft/hard deleting
    /// posts and comments. Passes when the actor holds the moderator or
    /// admin role, or authored the resource.
    pub fn require_moderator_or_author(
        &self,
        role: &UserRole,
        actor_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), AppError> {
        if role.is_moderator_or_above() || actor_id == author_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ))
        }
    }

    /// Moderator-or-admin operations with no ownership escape hatch
    /// (hard-deleting others' comments).
    pub fn require_moderator(&self, role: &UserRole) -> Result<(), AppError> {
        if role.is_moderator_or_above() {
            Ok(())
        } else {
            Err(AppError::forbidden("Moderator access required"))
        }
    }

    /// Self-service operations: editing one's own content, profile updates,
    /// account deletion. Admins pass for any owner.
    pub fn require_owner(
        &self,
        role: &UserRole,
        actor_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), AppError> {
        if actor_id == owner_id || role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to modify this resource",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::error::ErrorKind;

    #[test]
    fn test_require_admin() {
        let gate = AccessGate::new();
        assert!(gate.require_admin(&UserRole::Admin).is_ok());
        assert!(gate.require_admin(&UserRole::Moderator).is_err());
        assert!(gate.require_admin(&UserRole::User).is_err());
    }

    #[test]
    fn test_moderator_or_author() {
        let gate = AccessGate::new();
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        // Author passes regardless of role.
        assert!(
            gate.require_moderator_or_author(&UserRole::User, author, author)
                .is_ok()
        );
        // Moderators and admins pass for others' content.
        assert!(
            gate.require_moderator_or_author(&UserRole::Moderator, stranger, author)
                .is_ok()
        );
        assert!(
            gate.require_moderator_or_author(&UserRole::Admin, stranger, author)
                .is_ok()
        );
        // A plain user cannot touch someone else's content.
        assert!(
            gate.require_moderator_or_author(&UserRole::User, stranger, author)
                .is_err()
        );
    }

    #[test]
    fn test_require_owner() {
        let gate = AccessGate::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(gate.require_owner(&UserRole::User, owner, owner).is_ok());
        assert!(gate.require_owner(&UserRole::Admin, stranger, owner).is_ok());
        assert!(
            gate.require_owner(&UserRole::Moderator, stranger, owner)
                .is_err()
        );
    }

    #[test]
    fn test_rejections_are_forbidden_kind() {
        let gate = AccessGate::new();
        let err = gate.require_admin(&UserRole::User).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}
