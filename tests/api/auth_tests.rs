//! Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{field_errors, TestApp, TEST_ADMIN};
use usecase_desk::infrastructure::seed::DEMO_PASSWORD;

#[tokio::test]
async fn test_login_returns_token_and_roles() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": TEST_ADMIN, "password": DEMO_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["account"]["username"], "admin");
    assert_eq!(body["account"]["roles"], json!(["administrator"]));
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_with_blank_fields_lists_both() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": " ", "password": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = field_errors(&response.json());
    assert_eq!(
        errors,
        vec![
            ("password".to_string(), "Password cannot be empty".to_string()),
            ("username".to_string(), "Username cannot be empty".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_wrong_password_then_lockout() {
    let app = TestApp::new().await;
    let max = app.state.settings.auth.max_failed_attempts;

    for _ in 1..max {
        let response = app
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": "teacher", "password": "nope" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "teacher", "password": "nope" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Even the right password is refused once locked
    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "teacher", "password": DEMO_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Account locked after too many failed attempts");
}

#[tokio::test]
async fn test_disabled_account_cannot_log_in() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "former", "password": DEMO_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/news").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.server
        .get("/api/v1/news")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/api/v1/auth/logout")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get("/api/v1/news")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/v1/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
