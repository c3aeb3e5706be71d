//! Role-based access control for route groups.
//!
//! A route group declares a static allow-list and is wrapped with
//! [`require_roles`] through `axum::middleware::from_fn_with_state`. The role
//! check only runs after the caller is authenticated, and the handler never
//! runs when either step fails.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/applications", get(list_all_applications))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use visadesk_core::AppError;
use visadesk_models::users::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Any authenticated identity.
pub const ANY_ROLE: &[UserRole] = &[UserRole::User, UserRole::Admin];

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Authenticate the request, check the caller's role against `allowed_roles`,
/// and attach the resolved [`AuthUser`] to the request extensions.
pub async fn require_roles(
    state: &AppState,
    req: Request,
    next: Next,
    allowed_roles: &'static [UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, ANY_ROLE).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, ADMIN_ONLY).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    check_any_role(auth_user, std::slice::from_ref(&required_role))
}

/// The error never names the caller's role or the accepted ones.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&auth_user.role()) {
        tracing::warn!(user_id = %auth_user.user_id(), "Role check failed");
        return Err(AppError::forbidden());
    }

    Ok(())
}
