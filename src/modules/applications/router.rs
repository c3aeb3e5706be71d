use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    list_all_applications, list_own_applications, submit_application, update_application_status,
};
use crate::state::AppState;

pub fn init_applications_router() -> Router<AppState> {
    Router::new().route("/", get(list_own_applications).post(submit_application))
}

pub fn init_admin_applications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_applications))
        .route("/{id}/status", patch(update_application_status))
}
