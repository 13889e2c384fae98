//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum_test::TestServer;
use serde_json::{json, Value};

use usecase_desk::config::Settings;
use usecase_desk::infrastructure::seed::DEMO_PASSWORD;
use usecase_desk::startup::{build_router, build_state, AppState};

/// Test application over freshly seeded in-memory repositories
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(Settings::local().expect("default settings")).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let state = build_state(settings).await.expect("state builds");
        let server = TestServer::new(build_router(state.clone())).expect("test server starts");
        Self { server, state }
    }

    /// Log in and return the access token, asserting success.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["access_token"]
            .as_str()
            .expect("token in login response")
            .to_owned()
    }

    pub async fn admin_token(&self) -> String {
        self.login(TEST_ADMIN, DEMO_PASSWORD).await
    }

    pub async fn teacher_token(&self) -> String {
        self.login(TEST_TEACHER, DEMO_PASSWORD).await
    }
}

pub const TEST_ADMIN: &str = "admin";
pub const TEST_TEACHER: &str = "teacher";

/// `(field, message)` pairs of a validation error body
pub fn field_errors(body: &Value) -> Vec<(String, String)> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| {
                    (
                        e["field"].as_str().unwrap_or_default().to_owned(),
                        e["message"].as_str().unwrap_or_default().to_owned(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
