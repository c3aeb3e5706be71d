//! JWT (JSON Web Token) utilities for session tokens.
//!
//! Tokens are HS256 over [`Claims`], signed with [`JwtConfig::secret`].
//! Expiry is checked here rather than by `jsonwebtoken`, whose default
//! validation allows 60 seconds of leeway: a token is expired as soon as
//! `now >= exp`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use visadesk_config::JwtConfig;
use visadesk_models::users::UserRole;
use visadesk_models::{Email, UserId};

use crate::claims::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token, unparseable claims or unusable secret.
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Issue a session token for an identity, valid for
/// `jwt_config.access_token_expiry` seconds from now.
pub fn create_access_token(
    user_id: UserId,
    email: &Email,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let claims = Claims::new(
        user_id,
        email.clone(),
        role,
        Utc::now().timestamp(),
        jwt_config.access_token_expiry,
    );
    encode_claims(&claims, jwt_config)
}

/// Sign arbitrary claims. Refuses an empty secret.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::Encoding("signing secret is empty".to_string()));
    }

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify a session token and return its claims.
///
/// # Errors
///
/// - [`TokenError::Invalid`] for a bad signature, a malformed token, claims
///   that do not parse, or an empty secret
/// - [`TokenError::Expired`] when the signature is good but `now >= exp`
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::Invalid);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)?;

    if claims.is_expired_at(Utc::now().timestamp()) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
