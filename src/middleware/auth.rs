use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use visadesk_auth::{Claims, TokenError, verify_token};
use visadesk_core::AppError;
use visadesk_models::users::UserRole;
use visadesk_models::{Email, UserId};

use crate::state::AppState;

/// The identity resolved from a verified session token.
///
/// The access guard inserts it into request extensions; handlers behind the
/// guard read it from there, and handlers outside any guard verify the
/// `Authorization: Bearer` header themselves.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.sub
    }

    pub fn email(&self) -> &Email {
        &self.0.email
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == UserRole::Admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::unauthorized("Missing or malformed authorization header".to_string())
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config).map_err(|e| match e {
            TokenError::Expired => AppError::unauthorized("Token expired".to_string()),
            _ => AppError::unauthorized("Invalid token".to_string()),
        })?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: UserRole) -> AuthUser {
        AuthUser(Claims::new(
            UserId::new(),
            Email::new("test@example.com").unwrap(),
            role,
            1_700_000_000,
            3600,
        ))
    }

    #[test]
    fn test_accessors() {
        let user = auth_user(UserRole::User);
        assert_eq!(user.user_id(), user.0.sub);
        assert_eq!(user.email().as_str(), "test@example.com");
        assert_eq!(user.role(), UserRole::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_is_admin() {
        assert!(auth_user(UserRole::Admin).is_admin());
    }
}
