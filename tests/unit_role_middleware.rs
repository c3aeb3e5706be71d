use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceExt;
use visadesk::middleware::auth::AuthUser;
use visadesk::middleware::role::{require_admin, require_auth};
use visadesk::state::AppState;
use visadesk_auth::create_access_token;
use visadesk_config::{JwtConfig, LifecycleConfig};
use visadesk_models::users::UserRole;
use visadesk_models::{Email, UserId};

fn jwt_config() -> JwtConfig {
    JwtConfig::new("role-middleware-secret", 3600)
}

fn token_for(role: UserRole) -> String {
    create_access_token(
        UserId::new(),
        &Email::new("dave@example.com").unwrap(),
        role,
        &jwt_config(),
    )
    .unwrap()
}

/// Router with one guarded route whose handler counts its invocations.
fn guarded_app(admin_only: bool, hits: Arc<AtomicUsize>) -> Router {
    let state = AppState::in_memory(jwt_config(), LifecycleConfig::default());
    let handler = move |auth_user: AuthUser| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            auth_user.role().to_string()
        }
    };

    let route = get(handler);
    let route = if admin_only {
        route.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
    } else {
        route.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
    };

    Router::new().route("/guarded", route).with_state(state)
}

async fn call(app: Router, token: Option<String>) -> StatusCode {
    let mut request = Request::builder().uri("/guarded");
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {}", token));
    }
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_missing_token_never_reaches_handler() {
    let hits = Arc::new(AtomicUsize::new(0));

    let status = call(guarded_app(false, hits.clone()), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_any_role_admits_user() {
    let hits = Arc::new(AtomicUsize::new(0));

    let status = call(guarded_app(false, hits.clone()), Some(token_for(UserRole::User))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_admin_only_rejects_user_before_handler() {
    let hits = Arc::new(AtomicUsize::new(0));

    let status = call(guarded_app(true, hits.clone()), Some(token_for(UserRole::User))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_admin_only_admits_admin() {
    let hits = Arc::new(AtomicUsize::new(0));

    let status = call(guarded_app(true, hits.clone()), Some(token_for(UserRole::Admin))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unverifiable_token_is_unauthenticated_not_forbidden() {
    let hits = Arc::new(AtomicUsize::new(0));
    let foreign = create_access_token(
        UserId::new(),
        &Email::new("dave@example.com").unwrap(),
        UserRole::Admin,
        &JwtConfig::new("another-secret", 3600),
    )
    .unwrap();

    let status = call(guarded_app(true, hits.clone()), Some(foreign)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
