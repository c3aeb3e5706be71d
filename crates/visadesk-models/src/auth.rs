//! Authentication request and response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{UserRole, UserView, validate_password_bytes};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(
        length(min = 6, message = "password must be at least 6 characters"),
        custom(function = "validate_password_bytes")
    )]
    #[schema(example = "secret1")]
    pub password: String,
    /// Defaults to `user` when omitted.
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_role_is_optional() {
        let dto: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@example.com","password":"secret1"}"#).unwrap();
        assert!(dto.role.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let result = serde_json::from_str::<RegisterRequest>(
            r#"{"email":"a@example.com","password":"secret1","role":"root"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_register_password_too_short() {
        let dto = RegisterRequest {
            email: "a@example.com".to_string(),
            password: "12345".to_string(),
            role: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_password_over_72_bytes() {
        let dto = RegisterRequest {
            email: "a@example.com".to_string(),
            password: "密".repeat(25),
            role: None,
        };
        assert_eq!(dto.password.chars().count(), 25);
        assert!(dto.validate().is_err());

        let ascii = RegisterRequest {
            password: "a".repeat(72),
            ..dto
        };
        assert!(ascii.validate().is_ok());
    }

    #[test]
    fn test_login_requires_valid_email() {
        let dto = LoginRequest {
            email: "nope".to_string(),
            password: "secret1".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
