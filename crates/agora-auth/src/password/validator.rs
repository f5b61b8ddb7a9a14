//! Password policy enforcement for new passwords.

use agora_core::config::auth::AuthConfig;
use agora_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            jwt_secret: "secret".to_string(),
            token_ttl_hours: 8,
            password_min_length: 8,
        })
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(validator().validate("p1").is_err());
    }

    #[test]
    fn test_weak_password_rejected() {
        assert!(validator().validate("password").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator().validate("tr4verse-Banjo-cloud").is_ok());
    }

    #[test]
    fn test_same_password_rejected() {
        assert!(validator().validate_not_same("abc", "abc").is_err());
        assert!(validator().validate_not_same("abc", "def").is_ok());
    }
}
