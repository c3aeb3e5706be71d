use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use visadesk_models::applications::{
    Application, ApplicationOwner, ApplicationStatus, ApplicationWithOwner, CreateApplicationDto,
    PersonalInfo, TravelInfo, UpdateApplicationStatusDto,
};
use visadesk_models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use visadesk_models::users::{CreateAdminDto, MeResponse, UserRole, UserView};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::create_admin,
        crate::modules::users::controller::list_users,
        crate::modules::applications::controller::submit_application,
        crate::modules::applications::controller::list_own_applications,
        crate::modules::applications::controller::list_all_applications,
        crate::modules::applications::controller::update_application_status,
    ),
    components(
        schemas(
            UserRole,
            UserView,
            MeResponse,
            CreateAdminDto,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ApplicationStatus,
            PersonalInfo,
            TravelInfo,
            Application,
            ApplicationOwner,
            ApplicationWithOwner,
            CreateApplicationDto,
            UpdateApplicationStatusDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Identity endpoints"),
        (name = "Applications", description = "Submitting and viewing your own visa applications"),
        (name = "Admin", description = "Reviewing and deciding on applications")
    ),
    info(
        title = "VisaDesk API",
        version = "0.1.0",
        description = "Visa application intake: registration, JWT sessions, role-based access and application review."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
