//! User account service — registration, login/logout, profile updates,
//! account deletion, and admin user management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_auth::access::AccessGate;
use agora_auth::password::{PasswordHasher, PasswordValidator};
use agora_auth::session::{IssuedToken, RevocationManager, TokenIssuer};
use agora_core::error::AppError;
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_database::repositories::user::UserRepository;
use agora_entity::user::model::CreateUser;
use agora_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Data for a new registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
}

/// A password change within a profile update: the current password must be
/// presented alongside the new one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PasswordChange {
    /// The current password.
    pub current: String,
    /// The new password.
    pub new: String,
}

/// Typed profile update — named optional fields instead of a free-form
/// field map filtered at runtime.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfile {
    /// New username, if changing.
    pub username: Option<String>,
    /// New email, if changing.
    pub email: Option<String>,
    /// Password change pair, if changing.
    pub password: Option<PasswordChange>,
}

/// Handles account lifecycle and profile operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    password_policy: Arc<PasswordValidator>,
    /// Token issuance.
    issuer: Arc<TokenIssuer>,
    /// Token revocation.
    revocation: Arc<RevocationManager>,
    /// Access gate.
    gate: Arc<AccessGate>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        password_policy: Arc<PasswordValidator>,
        issuer: Arc<TokenIssuer>,
        revocation: Arc<RevocationManager>,
        gate: Arc<AccessGate>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_policy,
            issuer,
            revocation,
            gate,
        }
    }

    /// Registers a new user and signs them in.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, IssuedToken), AppError> {
        validate_username(&req.username)?;
        validate_email(&req.email)?;
        self.password_policy.validate(&req.password)?;

        if self
            .user_repo
            .find_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Username already exists. Please choose another one.",
            ));
        }
        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already exists. Please choose another one.",
            ));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: req.username,
                email: req.email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        let token = self.issuer.issue(&user).await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok((user, token))
    }

    /// Authenticates by email and password and issues a fresh token.
    ///
    /// Missing user and wrong password collapse into the same error so the
    /// endpoint cannot be used to enumerate accounts. Replace-on-issue means
    /// a successful login supersedes any previous session.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid login credentials"))?;

        let matches = self.hasher.verify_password(password, &user.password_hash)?;
        if !matches {
            return Err(AppError::unauthorized("Invalid login credentials"));
        }

        let token = self.issuer.issue(&user).await?;

        info!(user_id = %user.id, "Login successful");

        Ok((user, token))
    }

    /// Logs the current user out by revoking their token collection.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.revocation.revoke_user(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, "Logout completed");
        Ok(())
    }

    /// Logs the current user out everywhere, clearing the collection.
    pub async fn logout_all(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.revocation.purge_user(ctx.user_id).await?;
        Ok(())
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Applies a typed profile update to the current user.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: UpdateProfile,
    ) -> Result<User, AppError> {
        let mut user = self.get_profile(ctx).await?;

        if let Some(username) = update.username {
            validate_username(&username)?;
            if let Some(existing) = self.user_repo.find_by_username(&username).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict(
                        "Username already exists. Please choose another one.",
                    ));
                }
            }
            user = self.user_repo.update_username(ctx.user_id, &username).await?;
        }

        if let Some(email) = update.email {
            validate_email(&email)?;
            if let Some(existing) = self.user_repo.find_by_email(&email).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict(
                        "Email already exists. Please choose another one.",
                    ));
                }
            }
            user = self.user_repo.update_email(ctx.user_id, &email).await?;
        }

        if let Some(change) = update.password {
            let valid = self
                .hasher
                .verify_password(&change.current, &user.password_hash)?;
            if !valid {
                return Err(AppError::unauthorized("Current password is incorrect"));
            }
            self.password_policy.validate(&change.new)?;
            self.password_policy
                .validate_not_same(&change.current, &change.new)?;

            let new_hash = self.hasher.hash_password(&change.new)?;
            self.user_repo.update_password(ctx.user_id, &new_hash).await?;
            user = self.get_profile(ctx).await?;

            info!(user_id = %ctx.user_id, "Password changed");
        }

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }

    /// Hard-deletes the current user's account. The session token
    /// collection cascades away with the row.
    pub async fn delete_account(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let removed = self.user_repo.delete(ctx.user_id).await?;
        if !removed {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %ctx.user_id, "Account deleted");
        Ok(())
    }

    // ── Admin operations ─────────────────────────────────────────

    /// Lists all users. Admin only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.gate.require_admin(&ctx.role)?;
        self.user_repo.find_all(page).await
    }

    /// Fetches any user by ID. Admin only.
    pub async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        self.gate.require_admin(&ctx.role)?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Sets a user's role by fiat. Admin only.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.gate.require_admin(&ctx.role)?;
        let user = self.user_repo.update_role(id, role).await?;
        info!(admin_id = %ctx.user_id, user_id = %id, role = %role, "Role assigned");
        Ok(user)
    }

    /// Hard-deletes any user. Admin only.
    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.gate.require_admin(&ctx.role)?;
        let removed = self.user_repo.delete(id).await?;
        if !removed {
            return Err(AppError::not_found("User not found"));
        }
        info!(admin_id = %ctx.user_id, user_id = %id, "User deleted by admin");
        Ok(())
    }
}

/// Minimal username shape check; uniqueness is checked against the store.
fn validate_username(username: &str) -> Result<(), AppError> {
    let trimmed = username.trim();
    if trimmed.len() < 3 || trimmed.len() > 100 {
        return Err(AppError::validation(
            "Username must be between 3 and 100 characters",
        ));
    }
    Ok(())
}

/// Minimal email shape check.
fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}
