//! Request guards.
//!
//! - [`auth`]: The [`auth::AuthUser`] extractor (bearer token to identity)
//! - [`role`]: Route-group role allow-lists
//!
//! Flow for a protected request:
//!
//! 1. `require_auth` / `require_admin` extracts `Authorization: Bearer <token>`
//! 2. The token is verified; a missing, malformed, invalid or expired token is a 401
//! 3. The caller's role is checked against the group's allow-list; failure is a 403
//! 4. The resolved `AuthUser` is stored in request extensions and the handler runs

pub mod auth;
pub mod role;
