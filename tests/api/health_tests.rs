//! Health Check and Metrics API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_reports_both_links() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["servers"][0]["server"], "ETOUR");
    assert_eq!(body["servers"][0]["connected"], true);
    assert_eq!(body["servers"][1]["server"], "SMOS");
}

#[tokio::test]
async fn test_health_check_needs_no_token() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let app = TestApp::new().await;
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("usecase_desk_http_requests_total"));
}
