use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use visadesk_core::AppError;
use visadesk_models::users::{CreateAdminDto, MeResponse, UserView};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the caller's own identity
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Identity no longer exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let me = UserService::get_me(state.users.as_ref(), auth_user.user_id()).await?;
    Ok(Json(me))
}

/// Create an admin identity (admin only)
#[utoipa::path(
    post,
    path = "/users/admin",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = UserView),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let user = UserService::create_admin(state.users.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List every identity (admin only)
#[utoipa::path(
    get,
    path = "/users/all",
    responses(
        (status = 200, description = "All identities", body = Vec<UserView>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, AppError> {
    let users = UserService::list_users(state.users.as_ref()).await?;
    Ok(Json(users))
}
