//! JWT signature and expiry verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use agora_core::config::auth::AuthConfig;
use agora_core::error::AppError;

use super::claims::Claims;

/// The one message every authentication failure surfaces.
///
/// Malformed, expired, unsigned, unknown, and revoked tokens are
/// indistinguishable to the caller so the API cannot be used as a
/// probing oracle.
pub const AUTH_REQUIRED: &str = "Authentication required";

/// Verifies session token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token string, verifying signature and expiry.
    ///
    /// Every failure collapses into the same unauthorized error; the
    /// underlying reason is logged at debug level only.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(reason = %e, "Token verification failed");
                AppError::unauthorized(AUTH_REQUIRED)
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use agora_entity::user::{User, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 8,
            password_min_length: 8,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Moderator,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_roundtrip_identifies_user_and_role() {
        let config = test_config("test-secret");
        let user = test_user();

        let (token, _) = JwtEncoder::new(&config).sign(&user).unwrap();
        let claims = JwtDecoder::new(&config).decode(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Moderator);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = test_user();
        let (token, _) = JwtEncoder::new(&test_config("secret-a")).sign(&user).unwrap();

        let err = JwtDecoder::new(&test_config("secret-b"))
            .decode(&token)
            .unwrap_err();
        assert_eq!(err.message, AUTH_REQUIRED);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let decoder = JwtDecoder::new(&test_config("secret"));
        assert!(decoder.decode("not-a-jwt").is_err());
        assert!(decoder.decode("").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        use crate::jwt::claims::Claims;
        use jsonwebtoken::{EncodingKey, Header, encode};

        let config = test_config("secret");
        let user = test_user();

        // A correctly signed token whose validity window has passed.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            username: user.username.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = JwtDecoder::new(&config).decode(&token).unwrap_err();
        assert_eq!(err.message, AUTH_REQUIRED);
    }
}
