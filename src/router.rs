use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_auth};
use crate::modules::applications::router::{
    init_admin_applications_router, init_applications_router,
};
use crate::modules::auth::router::init_auth_router;
use crate::modules::users::controller::get_me;
use crate::modules::users::router::{init_profile_router, init_users_admin_router};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/auth", init_auth_router())
        .route(
            "/me",
            get(get_me).route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .nest(
            "/users",
            init_profile_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
                .merge(
                    init_users_admin_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                ),
        )
        .nest(
            "/applications",
            init_applications_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .nest(
            "/admin/applications",
            init_admin_applications_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
