//! Simulated Server Link API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestApp;
use usecase_desk::config::Settings;
use usecase_desk::shared::error::CONNECTION_INTERRUPTED_MESSAGE;

#[tokio::test]
async fn test_disconnected_etour_fails_etour_use_cases_only() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/simulation/servers/etour")
        .authorization_bearer(&token)
        .json(&json!({ "connected": false }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "server": "ETOUR", "connected": false }));

    let response = app
        .server
        .get("/api/v1/news/1")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["message"], CONNECTION_INTERRUPTED_MESSAGE);

    // SMOS keeps working
    app.server
        .get("/api/v1/addresses")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_failed_write_leaves_state_intact_until_reconnect() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.state.links.etour.disconnect();

    let response = app
        .server
        .delete("/api/v1/news/1")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    app.server
        .put("/api/v1/simulation/servers/ETOUR")
        .authorization_bearer(&token)
        .json(&json!({ "connected": true }))
        .await
        .assert_status_ok();

    app.server
        .get("/api/v1/news/1")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unknown_server_is_not_found() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/simulation/servers/ldap")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_configured_disconnection_applies_after_seeding() {
    let mut settings = Settings::local().unwrap();
    settings.simulation.smos_connected = false;
    let app = TestApp::with_settings(settings).await;

    assert!(app.state.links.etour.is_connected());
    assert!(!app.state.links.smos.is_connected());

    // Accounts live on SMOS, so nobody can log in
    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "admin", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
