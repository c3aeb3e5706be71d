//! Application error type with HTTP response conversion.
//!
//! Every failure that leaves a handler is an [`AppError`]: an HTTP status, a
//! stable [`ErrorKind`] that clients can match on, and the underlying
//! [`anyhow::Error`] carrying the message.
//!
//! Internal failures (database, hashing, token encoding) are logged in full
//! and rendered with a generic message so infrastructure details never reach
//! the caller.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Stable, caller-visible error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing, malformed, invalid or expired session token.
    Unauthenticated,
    /// Authenticated, but the caller's role is not allowed.
    Forbidden,
    /// Login failed. Identical for unknown email and wrong password.
    InvalidCredentials,
    /// An identity with the same normalized email already exists.
    EmailTaken,
    /// Referenced identity or application does not exist.
    NotFound,
    /// Malformed request body or field.
    Validation,
    /// Status change not allowed by the configured transition policy.
    InvalidTransition,
    /// The application changed since the version the caller read.
    VersionConflict,
    /// Infrastructure failure (database, hashing, token encoding).
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::VersionConflict => "VERSION_CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Internal, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::internal(err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorKind::Unauthenticated,
            anyhow!(message),
        )
    }

    /// The message is fixed: it must not reveal the caller's role or the
    /// role that would have been accepted.
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, ErrorKind::Forbidden, anyhow!("Forbidden"))
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidCredentials,
            anyhow!("Invalid credentials"),
        )
    }

    pub fn email_taken() -> Self {
        Self::new(
            StatusCode::CONFLICT,
            ErrorKind::EmailTaken,
            anyhow!("Email already registered"),
        )
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, ErrorKind::Validation, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Validation, err)
    }

    pub fn invalid_transition<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::InvalidTransition, err)
    }

    pub fn version_conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::VersionConflict, err)
    }

    /// Message shown to the caller.
    pub fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Internal error while handling request");
        }

        let body = Json(json!({
            "error": self.public_message(),
            "code": self.kind.as_str(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
