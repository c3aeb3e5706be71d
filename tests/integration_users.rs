mod common;

use axum::http::StatusCode;
use common::{
    TEST_SECRET, generate_unique_email, register, register_admin, register_user, send,
    setup_test_app,
};
use serde_json::json;
use visadesk_config::JwtConfig;
use visadesk_models::users::UserRole;
use visadesk_models::{Email, UserId};

#[tokio::test]
async fn test_get_me_on_both_paths() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let (token, _) = register(&app, &email, None).await;

    for path in ["/me", "/users/me"] {
        let (status, body) = send(&app, "GET", path, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body, json!({ "email": email, "role": "user" }));
    }
}

#[tokio::test]
async fn test_get_me_for_vanished_identity() {
    let app = setup_test_app();
    let token = visadesk_auth::create_access_token(
        UserId::new(),
        &Email::new("ghost@example.com").unwrap(),
        UserRole::User,
        &JwtConfig::new(TEST_SECRET, 3600),
    )
    .unwrap();

    let (status, body) = send(&app, "GET", "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_admin_creates_admin() {
    let app = setup_test_app();
    let admin_token = register_admin(&app).await;
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/users/admin",
        Some(&admin_token),
        Some(json!({ "email": email, "password": "secret2" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "admin");
    assert!(body.get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "secret2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_create_admin_duplicate_email() {
    let app = setup_test_app();
    let admin_token = register_admin(&app).await;
    let email = generate_unique_email();
    register(&app, &email, None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/admin",
        Some(&admin_token),
        Some(json!({ "email": email, "password": "secret2" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_non_admin_cannot_create_admin() {
    let app = setup_test_app();
    let user_token = register_user(&app).await;
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/users/admin",
        Some(&user_token),
        Some(json!({ "email": email, "password": "secret2" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Forbidden", "code": "FORBIDDEN" }));

    // No identity was created.
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "secret2" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let app = setup_test_app();
    let user_token = register_user(&app).await;

    let (status, _) = send(&app, "GET", "/users/all", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/users/all", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_returns_views() {
    let app = setup_test_app();
    let admin_token = register_admin(&app).await;
    register_user(&app).await;
    register_user(&app).await;

    let (status, body) = send(&app, "GET", "/users/all", Some(&admin_token), None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    for user in users {
        assert!(user["id"].is_string());
        assert!(user["email"].is_string());
        assert!(user.get("password").is_none());
    }
    assert_eq!(users.iter().filter(|u| u["role"] == "admin").count(), 1);
}
