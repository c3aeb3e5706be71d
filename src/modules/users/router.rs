use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{create_admin, get_me, list_users};
use crate::state::AppState;

/// Routes open to any authenticated identity.
pub fn init_profile_router() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Admin-only identity management.
pub fn init_users_admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin", post(create_admin))
        .route("/all", get(list_users))
}
