//! Address, class, enrollment, late entry and justification API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{field_errors, TestApp};

// =============================================================================
// Addresses
// =============================================================================

#[tokio::test]
async fn test_delete_address_with_classes_is_refused() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .delete("/api/v1/addresses/1")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Cannot delete address: it has associated classes (1A, 2B)"
    );

    // Still there
    app.server
        .get("/api/v1/addresses/1")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_free_address() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .delete("/api/v1/addresses/4")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let addresses: Value = app
        .server
        .get("/api/v1/addresses")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(addresses.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_insert_address_validates_zip_code() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let mut form = json!({
        "name": "Music Hall",
        "street": "Via Roma 1",
        "city": "Salerno",
        "zip_code": "841",
        "country": "Italy"
    });

    let response = app
        .server
        .post("/api/v1/addresses")
        .authorization_bearer(&token)
        .json(&form)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![(
            "zip_code".to_owned(),
            "Zip code must be 5 digits, optionally followed by -4 digits".to_owned()
        )]
    );

    form["zip_code"] = json!("84121");
    let response = app
        .server
        .post("/api/v1/addresses")
        .authorization_bearer(&token)
        .json(&form)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["id"], 5);
}

// =============================================================================
// Enrollment
// =============================================================================

#[tokio::test]
async fn test_accept_pending_request_creates_student() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let pending: Value = app
        .server
        .get("/api/v1/enrollments")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(pending.as_array().map(Vec::len), Some(2));

    let response = app
        .server
        .post("/api/v1/enrollments/1/accept")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let student: Value = response.json();
    assert_eq!(student["name"], "Giulia Verdi");
    assert_eq!(student["id"], 3);

    let pending: Value = app
        .server
        .get("/api/v1/enrollments")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_reject_processed_request_is_refused() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/enrollments/3/reject")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Registration request already accepted");
}

#[tokio::test]
async fn test_reject_pending_request() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/enrollments/2/reject")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "rejected");
}

// =============================================================================
// Late entries
// =============================================================================

#[tokio::test]
async fn test_late_entries_by_date() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let body: Value = app
        .server
        .get("/api/v1/late-entries")
        .authorization_bearer(&token)
        .add_query_param("date", "2024-03-11")
        .await
        .json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["student_id"], 1);

    let response = app
        .server
        .get("/api/v1/late-entries")
        .authorization_bearer(&token)
        .add_query_param("date", "11/03/2024")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_insert_late_entry() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/late-entries")
        .authorization_bearer(&token)
        .json(&json!({
            "student_id": 2,
            "date": "2024-03-12",
            "entry_time": "08:45",
            "note": "Train delay"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let entry: Value = response.json();
    assert_eq!(entry["id"], 2);

    let body: Value = app
        .server
        .get("/api/v1/late-entries")
        .authorization_bearer(&token)
        .add_query_param("date", "2024-03-12")
        .await
        .json();
    assert_eq!(body[0]["note"], "Train delay");
}

#[tokio::test]
async fn test_late_entry_for_unknown_student() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/late-entries")
        .authorization_bearer(&token)
        .json(&json!({ "student_id": 99, "date": "2024-03-12", "entry_time": "08:45" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Justifications
// =============================================================================

#[tokio::test]
async fn test_justify_absence_once() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/absences/1/justification")
        .authorization_bearer(&token)
        .json(&json!({ "reason": "Family reasons" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .post("/api/v1/absences/1/justification")
        .authorization_bearer(&token)
        .json(&json!({ "reason": "Family reasons again" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Absence is already justified");
}

#[tokio::test]
async fn test_absences_carry_their_justification() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let body: Value = app
        .server
        .get("/api/v1/students/1/absences")
        .authorization_bearer(&token)
        .await
        .json();

    let absences = body.as_array().unwrap();
    assert_eq!(absences.len(), 2);
    assert_eq!(absences[0]["justified"], false);
    assert!(absences[0]["justification"].is_null());
    assert_eq!(absences[1]["justified"], true);
    assert_eq!(absences[1]["justification"]["reason"], "Medical visit");
}

#[tokio::test]
async fn test_delete_justification_reopens_absence() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .delete("/api/v1/absences/2/justification")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let body: Value = app
        .server
        .get("/api/v1/students/1/absences")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(body[1]["justified"], false);
}

#[tokio::test]
async fn test_punctuation_only_reason_is_rejected() {
    let app = TestApp::new().await;
    let token = app.teacher_token().await;

    let response = app
        .server
        .post("/api/v1/absences/3/justification")
        .authorization_bearer(&token)
        .json(&json!({ "reason": "......" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![("reason".to_owned(), "Reason must contain words".to_owned())]
    );
}

// =============================================================================
// Classes and teachings
// =============================================================================

#[tokio::test]
async fn test_classes_of_address_by_year() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/addresses/1/classes")
        .authorization_bearer(&token)
        .add_query_param("academic_year", "2024-2025")
        .await
        .json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["1A", "2B"]);

    let body: Value = app
        .server
        .get("/api/v1/addresses/1/classes")
        .authorization_bearer(&token)
        .add_query_param("academic_year", "2019-2020")
        .await
        .json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_new_class_blocks_address_deletion() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/addresses/3/classes")
        .authorization_bearer(&token)
        .json(&json!({ "name": "4D", "academic_year": "2024-2025" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .delete("/api/v1/addresses/3")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_insert_class_validation_and_duplicate() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/addresses/1/classes")
        .authorization_bearer(&token)
        .json(&json!({ "name": "1A", "academic_year": "2024-2025" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .server
        .post("/api/v1/addresses/1/classes")
        .authorization_bearer(&token)
        .json(&json!({ "name": "5E", "academic_year": "2024/25" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_errors(&response.json()),
        vec![(
            "academic_year".to_string(),
            "Academic year must be in YYYY-YYYY format".to_string()
        )]
    );
}

#[tokio::test]
async fn test_assign_and_remove_teachings() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/addresses/2/teachings")
        .authorization_bearer(&token)
        .json(&json!({ "assign": [3], "remove": [2] }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let assigned: Vec<i64> = body["assigned"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(assigned, vec![3]);

    let teaching: Value = app
        .server
        .get("/api/v1/teachings/3")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(teaching["code"], "SCI2");
    assert_eq!(teaching["address_ids"], json!([2]));

    let response = app
        .server
        .get("/api/v1/teachings/99")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
