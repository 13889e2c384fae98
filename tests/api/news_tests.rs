//! News API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{field_errors, TestApp};

fn news_form(title: &str) -> Value {
    json!({
        "title": title,
        "content": "Arrivals on the Amalfi Coast keep growing.",
        "author": "Agency Desk",
        "publication_date": "2024-05-01",
        "status": "Published"
    })
}

#[tokio::test]
async fn test_load_seeded_news() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/news/1")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Tourism Booms");
}

#[tokio::test]
async fn test_blank_title_is_rejected_and_nothing_changes() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/news/1")
        .authorization_bearer(&token)
        .json(&news_form(""))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["message"], "Title cannot be empty");
    assert_eq!(
        field_errors(&body),
        vec![("title".to_string(), "Title cannot be empty".to_string())]
    );

    let stored: Value = app
        .server
        .get("/api/v1/news/1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(stored["title"], "Tourism Booms");
}

#[tokio::test]
async fn test_submit_edits_then_reload() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.server
        .put("/api/v1/news/1")
        .authorization_bearer(&token)
        .json(&news_form("Tourism Booms Again"))
        .await
        .assert_status_ok();

    let stored: Value = app
        .server
        .get("/api/v1/news/1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(stored["title"], "Tourism Booms Again");
}

#[tokio::test]
async fn test_insert_assigns_fresh_id_and_defaults_to_draft() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/news")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Ferry Strike",
            "content": "No departures on Friday.",
            "author": "Agency Desk",
            "publication_date": "2024-06-07"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["id"], 3);
    assert_eq!(body["status"], "Draft");
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .delete("/api/v1/news/2")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get("/api/v1/news/2")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "News not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/news/latest")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
