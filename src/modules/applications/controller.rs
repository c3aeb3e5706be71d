use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use visadesk_core::AppError;
use visadesk_models::ApplicationId;
use visadesk_models::applications::{
    Application, ApplicationWithOwner, CreateApplicationDto, UpdateApplicationStatusDto,
};

use super::service::{ApplicationService, application_not_found};
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Submit a visa application
#[utoipa::path(
    post,
    path = "/applications",
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Applications"
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn submit_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateApplicationDto>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application =
        ApplicationService::submit(state.applications.as_ref(), auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// List the caller's own applications
#[utoipa::path(
    get,
    path = "/applications",
    responses(
        (status = 200, description = "Applications owned by the caller", body = Vec<Application>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Applications"
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn list_own_applications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications =
        ApplicationService::list_own(state.applications.as_ref(), auth_user.user_id()).await?;
    Ok(Json(applications))
}

/// List every application with its owner (admin only)
#[utoipa::path(
    get,
    path = "/admin/applications",
    responses(
        (status = 200, description = "All applications", body = Vec<ApplicationWithOwner>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn list_all_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationWithOwner>>, AppError> {
    let applications = ApplicationService::list_all(state.applications.as_ref()).await?;
    Ok(Json(applications))
}

/// Set an application's status (admin only)
#[utoipa::path(
    patch,
    path = "/admin/applications/{id}/status",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusDto,
    responses(
        (status = 200, description = "Updated application", body = Application),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Invalid transition or version conflict", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateApplicationStatusDto>,
) -> Result<Json<Application>, AppError> {
    // A malformed id cannot name an existing application.
    let id: ApplicationId = id.parse().map_err(|_| application_not_found())?;

    let application = ApplicationService::transition(
        state.applications.as_ref(),
        state.lifecycle_config.transition_policy,
        id,
        dto,
    )
    .await?;
    Ok(Json(application))
}
