#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;
use visadesk::router::init_router;
use visadesk::state::AppState;
use visadesk_config::{JwtConfig, LifecycleConfig, RegistrationConfig};
use visadesk_db::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "secret1";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, 3600)
}

pub fn setup_test_app() -> Router {
    init_router(AppState::in_memory(
        test_jwt_config(),
        LifecycleConfig::default(),
    ))
}

pub fn setup_strict_app() -> Router {
    init_router(AppState::in_memory(
        test_jwt_config(),
        LifecycleConfig::strict(),
    ))
}

pub fn setup_app_without_admin_registration() -> Router {
    init_router(AppState::with_store(
        MemoryStore::new(),
        test_jwt_config(),
        LifecycleConfig::default(),
        RegistrationConfig {
            allow_admin_self_registration: false,
        },
    ))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Send a request and return the status plus the parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&body).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register an identity and return `(access_token, user_id)`.
pub async fn register(app: &Router, email: &str, role: Option<&str>) -> (String, String) {
    let mut body = json!({ "email": email, "password": TEST_PASSWORD });
    if let Some(role) = role {
        body["role"] = json!(role);
    }

    let (status, body) = send(app, "POST", "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

pub async fn register_user(app: &Router) -> String {
    register(app, &generate_unique_email(), None).await.0
}

pub async fn register_admin(app: &Router) -> String {
    register(app, &generate_unique_email(), Some("admin")).await.0
}

pub fn application_body(name: &str) -> Value {
    json!({
        "personalInfo": {
            "name": name,
            "email": "applicant@example.com",
            "passportNumber": "X1234567",
            "passportExpirationDate": "2032-01-31",
            "dateOfBirth": "1990-04-12T00:00:00Z",
            "nationality": "Kenyan",
            "gender": "female",
            "phoneNumber": "+254700000000",
            "address": "1 Main St"
        },
        "travelInfo": {
            "destination": "France",
            "date": "2030-05-01",
            "purpose": "tourism",
            "travelCompanions": [],
            "travelDates": ["2030-05-01", "2030-05-20"],
            "travelDocuments": ["passport"],
            "travelBudget": "3000 EUR",
            "travelInsurance": "AXA",
            "intendedArrivalDate": "2030-05-01",
            "intendedDepartureDate": "2030-05-20"
        }
    })
}

/// Submit an application as `token` and return its id.
pub async fn submit_application(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/applications",
        Some(token),
        Some(application_body(name)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}
