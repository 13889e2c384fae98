//! Cultural heritage, tourist, refreshment point, tag, menu and feedback API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{field_errors, TestApp};
use usecase_desk::infrastructure::seed::DEMO_TOURIST_PASSWORD;

fn site(name: &str, city: &str) -> Value {
    json!({
        "name": name,
        "city": city,
        "kind": "Church",
        "description": "Baroque church on the main square.",
        "opening_hours": "09:00-13:00"
    })
}

fn registration(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "first_name": "Paolo",
        "last_name": "Ferrari",
        "password": "Viaggio#2024",
        "confirm_password": "Viaggio#2024"
    })
}

// =============================================================================
// Cultural heritage
// =============================================================================

#[tokio::test]
async fn test_search_by_keyword_and_city() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/cultural-heritage")
        .authorization_bearer(&token)
        .add_query_param("keyword", "temples")
        .await
        .json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Parco Archeologico"]);

    let body: Value = app
        .server
        .get("/api/v1/cultural-heritage")
        .authorization_bearer(&token)
        .add_query_param("city", "ravello")
        .await
        .json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Villa Rufolo");
}

#[tokio::test]
async fn test_insert_site_and_refuse_duplicate() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/cultural-heritage")
        .authorization_bearer(&token)
        .json(&site("Chiesa di San Giorgio", "Salerno"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["id"], 4);

    let response = app
        .server
        .post("/api/v1/cultural-heritage")
        .authorization_bearer(&token)
        .json(&site("chiesa di san giorgio", "SALERNO"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_insert_site_with_blank_fields() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/cultural-heritage")
        .authorization_bearer(&token)
        .json(&site("  ", ""))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![
            ("city".to_owned(), "City cannot be empty".to_owned()),
            ("name".to_owned(), "Name cannot be empty".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_modify_and_delete_site() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/cultural-heritage/3")
        .authorization_bearer(&token)
        .json(&site("Parco Archeologico di Paestum", "Paestum"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Parco Archeologico di Paestum");

    let response = app
        .server
        .delete("/api/v1/cultural-heritage/3")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get("/api/v1/cultural-heritage/3")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Tourists
// =============================================================================

#[tokio::test]
async fn test_registration_is_public_and_hides_hash() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/tourists")
        .json(&registration("paolo_f", "paolo@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "paolo_f");
    assert_eq!(body["full_name"], "Paolo Ferrari");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_registration_refuses_taken_username() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/tourists")
        .json(&registration("mario_rossi", "someone@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Username already taken");
}

#[tokio::test]
async fn test_registration_reports_weak_password_and_mismatch() {
    let app = TestApp::new().await;

    let mut form = registration("paolo_f", "paolo@example.com");
    form["password"] = json!("weak");
    form["confirm_password"] = json!("different");

    let response = app.server.post("/api/v1/tourists").json(&form).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<String> = field_errors(&response.json())
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    assert_eq!(fields, vec!["confirm_password", "password"]);
}

#[tokio::test]
async fn test_tourist_search_needs_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/tourists").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let body: Value = app
        .server
        .get("/api/v1/tourists")
        .authorization_bearer(&token)
        .add_query_param("name", "bianchi")
        .await
        .json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["username"], "anna_bianchi");
}

#[tokio::test]
async fn test_modify_tourist_deactivates_account() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/tourists/2")
        .authorization_bearer(&token)
        .json(&json!({
            "email": "anna.bianchi@example.com",
            "first_name": "Anna",
            "last_name": "Bianchi",
            "active": false
        }))
        .await;
    response.assert_status_ok();

    let body: Value = app
        .server
        .get("/api/v1/tourists")
        .authorization_bearer(&token)
        .add_query_param("active", "false")
        .await
        .json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["email"], "anna.bianchi@example.com");
}

#[tokio::test]
async fn test_change_tourist_password() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/tourists/1/password")
        .authorization_bearer(&token)
        .json(&json!({
            "current_password": "Nope#2024",
            "new_password": "Costiera#2025",
            "confirm_password": "Costiera#2025"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![(
            "current_password".to_string(),
            "Current password is incorrect".to_string()
        )]
    );

    let response = app
        .server
        .put("/api/v1/tourists/1/password")
        .authorization_bearer(&token)
        .json(&json!({
            "current_password": DEMO_TOURIST_PASSWORD,
            "new_password": "Costiera#2025",
            "confirm_password": "Costiera#2025"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Menus
// =============================================================================

#[tokio::test]
async fn test_view_and_modify_menu() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/refreshment-points/1/menus/monday")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(body["dishes"][0], "Scialatielli ai frutti di mare");

    let response = app
        .server
        .put("/api/v1/refreshment-points/1/menus/Wed")
        .authorization_bearer(&token)
        .json(&json!({ "dishes": ["Ravioli capresi"], "special_notes": "Vegetarian" }))
        .await;
    response.assert_status_ok();

    let menus: Value = app
        .server
        .get("/api/v1/refreshment-points/1/menus")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(menus.as_array().map(Vec::len), Some(3));
    assert_eq!(menus[1]["dishes"][0], "Ravioli capresi");
}

#[tokio::test]
async fn test_missing_menu_and_unknown_day() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/refreshment-points/1/menus/sunday")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .get("/api/v1/refreshment-points/1/menus/someday")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_needs_a_dish() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/refreshment-points/1/menus/tue")
        .authorization_bearer(&token)
        .json(&json!({ "dishes": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![("dishes".to_owned(), "At least one dish is required".to_owned())]
    );
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn test_feedback_summary_and_release() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/cultural-heritage/2/feedback")
        .authorization_bearer(&token)
        .json(&json!({ "tourist_id": 2, "rating": 4, "comment": " Lovely gardens " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let feedback: Value = response.json();
    assert_eq!(feedback["comment"], "Lovely gardens");

    let summary: Value = app
        .server
        .get("/api/v1/cultural-heritage/2/feedback")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["average_rating"], 4.5);
}

#[tokio::test]
async fn test_feedback_released_twice_is_refused() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/cultural-heritage/2/feedback")
        .authorization_bearer(&token)
        .json(&json!({ "tourist_id": 1, "rating": 3 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Feedback already released for this site");
}

#[tokio::test]
async fn test_feedback_rating_out_of_range() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/cultural-heritage/1/feedback")
        .authorization_bearer(&token)
        .json(&json!({ "tourist_id": 2, "rating": 6 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_modify_feedback_comment() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .patch("/api/v1/feedback/1")
        .authorization_bearer(&token)
        .json(&json!({ "comment": "Still unforgettable" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["comment"], "Still unforgettable");
    assert_eq!(body["rating"], 5);
}

// =============================================================================
// Refreshment points
// =============================================================================

#[tokio::test]
async fn test_search_and_view_points() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/refreshment-points/search")
        .authorization_bearer(&token)
        .add_query_param("city", "salerno")
        .await
        .json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Trattoria da Gino", "Chiosco del Porto"]);

    let point: Value = app
        .server
        .get("/api/v1/refreshment-points/3")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(point["status"], "Under Maintenance");
    assert_eq!(point["address"], "Lungomare Trieste 40");
}

#[tokio::test]
async fn test_modify_point_card() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/refreshment-points/3")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Chiosco del Porto",
            "city": "Salerno",
            "address": "Lungomare Trieste 40",
            "status": "Open",
            "capacity": 12,
            "opening_hours": "10:00-22:00"
        }))
        .await;
    response.assert_status_ok();
    let point: Value = response.json();
    assert_eq!(point["status"], "Open");
    assert_eq!(point["capacity"], 12);
    assert_eq!(point["max_banners"], 2);

    let response = app
        .server
        .put("/api/v1/refreshment-points/3")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Trattoria da Gino",
            "city": "Salerno",
            "address": "Lungomare Trieste 40"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .server
        .put("/api/v1/refreshment-points/3")
        .authorization_bearer(&token)
        .json(&json!({ "name": "", "city": "Salerno", "address": "", "status": "Busy" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<String> = field_errors(&response.json())
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    assert_eq!(fields, vec!["address", "name", "status"]);
}

// =============================================================================
// Tags
// =============================================================================

#[tokio::test]
async fn test_insert_search_and_delete_tags() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/tags")
        .authorization_bearer(&token)
        .json(&json!({ "name": "wine", "description": "Cellars and wine bars" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["id"], 4);

    let body: Value = app
        .server
        .get("/api/v1/tags")
        .authorization_bearer(&token)
        .add_query_param("keyword", "sea")
        .await
        .json();
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let response = app
        .server
        .delete("/api/v1/tags")
        .authorization_bearer(&token)
        .json(&json!({ "ids": [1, 4] }))
        .await;
    response.assert_status_ok();

    let left: Value = app
        .server
        .get("/api/v1/tags")
        .authorization_bearer(&token)
        .await
        .json();
    let names: Vec<&str> = left
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["museums", "sea-view"]);
}

#[tokio::test]
async fn test_delete_tags_with_unknown_id_keeps_all() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .delete("/api/v1/tags")
        .authorization_bearer(&token)
        .json(&json!({ "ids": [2, 77] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/api/v1/tags")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Museums" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}
