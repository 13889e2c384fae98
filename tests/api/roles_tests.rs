//! Account role management API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_teacher_cannot_manage_roles() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .get("/api/v1/accounts/teacher/roles")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Administrator role required to manage roles");
}

#[tokio::test]
async fn test_admin_lists_roles() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/accounts/operator/roles")
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(
        body,
        json!({ "username": "operator", "roles": ["agency_operator", "point_operator"] })
    );
}

#[tokio::test]
async fn test_assign_and_remove_role() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/accounts/teacher/roles")
        .authorization_bearer(&token)
        .json(&json!({ "role": "Parent" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["roles"], json!(["teacher", "parent"]));

    let response = app
        .server
        .post("/api/v1/accounts/teacher/roles")
        .authorization_bearer(&token)
        .json(&json!({ "role": "parent" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .server
        .delete("/api/v1/accounts/teacher/roles/parent")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["roles"], json!(["teacher"]));
}

#[tokio::test]
async fn test_unknown_role_and_account() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/accounts/teacher/roles")
        .authorization_bearer(&token)
        .json(&json!({ "role": "janitor" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .server
        .get("/api/v1/accounts/nobody/roles")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
