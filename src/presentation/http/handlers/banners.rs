//! Banner Handlers
//!
//! Uploads are `multipart/form-data` with an `image` file part and the
//! declared `width` and `height` as text parts.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::services::{observe, BannerError, BannerUpload, PointSummaryDto};
use crate::domain::Banner;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<BannerError> for AppError {
    fn from(e: BannerError) -> Self {
        match e {
            BannerError::PointNotFound | BannerError::NotFound => AppError::NotFound(e.to_string()),
            BannerError::Validation(report) => AppError::Validation(report),
            BannerError::MaxBannersReached { .. } | BannerError::DuplicateImage => {
                AppError::Conflict(e.to_string())
            }
            BannerError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Read the upload parts. Missing parts are left empty so the service
/// reports them as validation errors.
async fn read_upload(mut multipart: Multipart) -> Result<BannerUpload, AppError> {
    let mut upload = BannerUpload {
        file_name: String::new(),
        data: Vec::new(),
        width: 0,
        height: 0,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "image" => {
                upload.file_name = field.file_name().unwrap_or_default().to_owned();
                upload.data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable image: {}", e)))?
                    .to_vec();
            }
            "width" | "height" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable {}: {}", name, e)))?;
                let value = text.trim().parse().unwrap_or(0);
                if name == "width" {
                    upload.width = value;
                } else {
                    upload.height = value;
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(upload)
}

/// List refreshment points with their banner counts
pub async fn list_points(
    State(state): State<AppState>,
) -> Result<Json<Vec<PointSummaryDto>>, AppError> {
    let points = observe("banners.list_points", state.banners.list_points().await)?;
    Ok(Json(points))
}

/// List the banners of one point
pub async fn list_banners(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
) -> Result<Json<Vec<Banner>>, AppError> {
    let point_id = parse_id(&point_id, "refreshment point")?;
    let banners = observe("banners.list", state.banners.list_banners(point_id).await)?;
    Ok(Json(banners))
}

/// Insert a banner
pub async fn insert_banner(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Banner>), AppError> {
    let point_id = parse_id(&point_id, "refreshment point")?;
    let upload = read_upload(multipart).await?;
    let banner = observe(
        "banners.insert",
        state.banners.insert_banner(point_id, upload).await,
    )?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Replace the image of a banner
pub async fn change_image(
    State(state): State<AppState>,
    Path(banner_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Banner>, AppError> {
    let banner_id = parse_id(&banner_id, "banner")?;
    let upload = read_upload(multipart).await?;
    let banner = observe(
        "banners.change_image",
        state.banners.change_image(banner_id, upload).await,
    )?;
    Ok(Json(banner))
}

/// Delete a banner
pub async fn delete_banner(
    State(state): State<AppState>,
    Path(banner_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let banner_id = parse_id(&banner_id, "banner")?;
    observe("banners.delete", state.banners.delete_banner(banner_id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
