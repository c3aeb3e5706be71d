//! Identity models and DTOs.
//!
//! [`User`] is the persisted identity record and the only type that carries
//! the password hash. It deliberately does not implement `Serialize`; every
//! representation that leaves the process goes through [`UserView`] or
//! [`MeResponse`].

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::UserId;
use crate::value_types::Email;

/// Closed set of roles an identity can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted identity record.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// bcrypt hash of the password.
    pub password: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Values needed to insert a new identity. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub role: UserRole,
}

/// Public identity representation: `{id, email, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Response for `GET /me` and `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub email: Email,
    pub role: UserRole,
}

/// Request body for `POST /users/admin`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(
        length(min = 6, message = "password must be at least 6 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// Longest password bcrypt hashes without truncation, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Rejects passwords bcrypt would silently truncate.
pub fn validate_password_bytes(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}
