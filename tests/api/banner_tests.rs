//! Banner API Tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;

use crate::common::{field_errors, TestApp};

fn banner_form(file_name: &str, bytes: &'static [u8], width: u32, height: u32) -> MultipartForm {
    MultipartForm::new()
        .add_text("width", width.to_string())
        .add_text("height", height.to_string())
        .add_part(
            "image",
            Part::bytes(bytes).file_name(file_name).mime_type("image/png"),
        )
}

#[tokio::test]
async fn test_points_report_banner_counts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body: Value = app
        .server
        .get("/api/v1/refreshment-points")
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(body[0]["name"], "Trattoria da Gino");
    assert_eq!(body[0]["banner_count"], 0);
    assert_eq!(body[1]["banner_count"], 1);
    assert_eq!(body[1]["max_banners"], 1);
}

#[tokio::test]
async fn test_insert_banner_then_list() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/refreshment-points/1/banners")
        .authorization_bearer(&token)
        .multipart(banner_form("lunch.png", b"lunch-offer", 800, 200))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let banner: Value = response.json();
    assert_eq!(banner["point_id"], 1);
    assert_eq!(banner["image_name"], "lunch.png");

    let banners: Value = app
        .server
        .get("/api/v1/refreshment-points/1/banners")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(banners.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_full_point_refuses_new_banner() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/refreshment-points/2/banners")
        .authorization_bearer(&token)
        .multipart(banner_form("aperitivo.png", b"aperitivo", 800, 200))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Maximum number of banners reached (1)");
}

#[tokio::test]
async fn test_duplicate_image_is_refused() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.server
        .post("/api/v1/refreshment-points/1/banners")
        .authorization_bearer(&token)
        .multipart(banner_form("a.png", b"same-bytes", 800, 200))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post("/api/v1/refreshment-points/1/banners")
        .authorization_bearer(&token)
        .multipart(banner_form("b.png", b"same-bytes", 800, 200))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_bad_dimensions_and_extension_are_reported() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/refreshment-points/1/banners")
        .authorization_bearer(&token)
        .multipart(banner_form("banner.bmp", b"bitmap", 100, 100))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<String> = field_errors(&response.json())
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    assert_eq!(fields, vec!["image", "dimensions"]);
}

#[tokio::test]
async fn test_change_image_and_delete() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .put("/api/v1/banners/1")
        .authorization_bearer(&token)
        .multipart(banner_form("spritz-summer.png", b"spritz-summer", 1024, 256))
        .await;
    response.assert_status_ok();
    let banner: Value = response.json();
    assert_eq!(banner["image_name"], "spritz-summer.png");

    let response = app
        .server
        .delete("/api/v1/banners/1")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .delete("/api/v1/banners/1")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
