//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use visadesk_models::users::UserRole;
use visadesk_models::{Email, UserId};

/// Claims embedded in every session token.
///
/// Handlers authorize from these claims alone, without a database lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Identity id (subject claim)
    pub sub: UserId,
    pub email: Email,
    pub role: UserRole,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: UserId, email: Email, role: UserRole, iat: i64, ttl_seconds: i64) -> Self {
        Self {
            sub,
            email,
            role,
            iat,
            exp: iat + ttl_seconds,
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Claims {
        Claims::new(
            UserId::new(),
            Email::new("alice@example.com").unwrap(),
            UserRole::User,
            1_700_000_000,
            3600,
        )
    }

    #[test]
    fn test_exp_is_iat_plus_ttl() {
        let claims = sample();
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let claims = sample();
        assert!(!claims.is_expired_at(claims.exp - 1));
        assert!(claims.is_expired_at(claims.exp));
    }

    #[test]
    fn test_claims_wire_format() {
        let claims = sample();
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["email"], "alice@example.com");
        assert_eq!(value["role"], "user");
        assert_eq!(value["sub"], claims.sub.to_string());
        assert_eq!(value["iat"], 1_700_000_000);
    }
}
