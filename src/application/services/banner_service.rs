//! Banner Service
//!
//! Advertising banners of refreshment points: insert, change image, delete,
//! and the per-point count checked against the agreed maximum.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use super::OutcomeLabel;
use crate::domain::value_objects::image::{self, ImageFormat, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::domain::{Banner, BannerRepository, RefreshmentPoint, RefreshmentPointRepository};
use crate::shared::error::{RepositoryError, ValidationReport};

/// Banner service trait
#[async_trait]
pub trait BannerService: Send + Sync {
    /// All refreshment points with their current banner count
    async fn list_points(&self) -> Result<Vec<PointSummaryDto>, BannerError>;

    async fn list_banners(&self, point_id: i64) -> Result<Vec<Banner>, BannerError>;

    async fn insert_banner(&self, point_id: i64, upload: BannerUpload) -> Result<Banner, BannerError>;

    /// Replace the image of an existing banner
    async fn change_image(&self, banner_id: i64, upload: BannerUpload) -> Result<Banner, BannerError>;

    async fn delete_banner(&self, banner_id: i64) -> Result<(), BannerError>;
}

// =============================================================================
// Data Transfer Objects
// =============================================================================

/// An uploaded image with the dimensions declared by the client.
#[derive(Debug, Clone)]
pub struct BannerUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointSummaryDto {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub max_banners: usize,
    pub banner_count: usize,
}

impl PointSummaryDto {
    fn new(point: RefreshmentPoint, banner_count: usize) -> Self {
        Self {
            id: point.id,
            name: point.name,
            city: point.city,
            max_banners: point.max_banners,
            banner_count,
        }
    }
}

/// Banner service errors
#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("Refreshment point not found")]
    PointNotFound,

    #[error("Banner not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Maximum number of banners reached ({max})")]
    MaxBannersReached { max: usize },

    #[error("This image is already used by a banner of the point")]
    DuplicateImage,

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for BannerError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::PointNotFound | Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::MaxBannersReached { .. } | Self::DuplicateImage => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

/// BannerService implementation
pub struct BannerServiceImpl<P, B>
where
    P: RefreshmentPointRepository,
    B: BannerRepository,
{
    point_repo: Arc<P>,
    banner_repo: Arc<B>,
    max_image_bytes: usize,
    // One lock per point: the count and duplicate checks hold it until the
    // banner is saved.
    point_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl<P, B> BannerServiceImpl<P, B>
where
    P: RefreshmentPointRepository,
    B: BannerRepository,
{
    pub fn new(point_repo: Arc<P>, banner_repo: Arc<B>, max_image_bytes: usize) -> Self {
        Self {
            point_repo,
            banner_repo,
            max_image_bytes,
            point_locks: DashMap::new(),
        }
    }

    fn point_lock(&self, point_id: i64) -> Arc<Mutex<()>> {
        self.point_locks.entry(point_id).or_default().clone()
    }

    /// Checks that need nothing but the upload itself.
    fn check_upload(&self, upload: &BannerUpload) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();

        if upload.data.is_empty() {
            report.add("image", "Image file is required");
        } else if upload.data.len() > self.max_image_bytes {
            report.add(
                "image",
                format!("Image must be at most {} bytes", self.max_image_bytes),
            );
        }
        if ImageFormat::from_file_name(&upload.file_name).is_none() {
            report.add("image", "Image must be a JPG, PNG, GIF or WEBP file");
        }
        if !image::dimensions_fit(upload.width, upload.height) {
            report.add(
                "dimensions",
                format!(
                    "Image must be between {MIN_WIDTH}x{MIN_HEIGHT} and {MAX_WIDTH}x{MAX_HEIGHT} pixels"
                ),
            );
        }

        report.into_result()
    }
}

#[async_trait]
impl<P, B> BannerService for BannerServiceImpl<P, B>
where
    P: RefreshmentPointRepository + 'static,
    B: BannerRepository + 'static,
{
    async fn list_points(&self) -> Result<Vec<PointSummaryDto>, BannerError> {
        let points = self.point_repo.find_all().await?;
        let banners = self.banner_repo.find_all().await?;

        Ok(points
            .into_iter()
            .map(|point| {
                let count = banners.iter().filter(|b| b.point_id == point.id).count();
                PointSummaryDto::new(point, count)
            })
            .collect())
    }

    async fn list_banners(&self, point_id: i64) -> Result<Vec<Banner>, BannerError> {
        self.point_repo
            .find_by_id(point_id)
            .await?
            .ok_or(BannerError::PointNotFound)?;

        Ok(self.banner_repo.find_by_point(point_id).await?)
    }

    async fn insert_banner(&self, point_id: i64, upload: BannerUpload) -> Result<Banner, BannerError> {
        self.check_upload(&upload)?;

        let lock = self.point_lock(point_id);
        let _guard = lock.lock().await;

        let point = self
            .point_repo
            .find_by_id(point_id)
            .await?
            .ok_or(BannerError::PointNotFound)?;

        let existing = self.banner_repo.find_by_point(point_id).await?;
        if existing.len() >= point.max_banners {
            tracing::info!(point_id, max = point.max_banners, "Banner limit reached");
            return Err(BannerError::MaxBannersReached {
                max: point.max_banners,
            });
        }

        let digest = image::digest(&upload.data);
        if existing.iter().any(|b| b.digest == digest) {
            return Err(BannerError::DuplicateImage);
        }

        let banner = Banner {
            id: self.banner_repo.next_id().await?,
            point_id,
            image_name: upload.file_name,
            digest,
            size_bytes: upload.data.len(),
            width: upload.width,
            height: upload.height,
            created_at: Utc::now(),
        };

        let saved = self.banner_repo.save(&banner).await?;
        tracing::info!(banner_id = saved.id, point_id, "Banner inserted");
        Ok(saved)
    }

    async fn change_image(&self, banner_id: i64, upload: BannerUpload) -> Result<Banner, BannerError> {
        self.check_upload(&upload)?;

        let mut banner = self
            .banner_repo
            .find_by_id(banner_id)
            .await?
            .ok_or(BannerError::NotFound)?;

        let lock = self.point_lock(banner.point_id);
        let _guard = lock.lock().await;

        let digest = image::digest(&upload.data);
        let siblings = self.banner_repo.find_by_point(banner.point_id).await?;
        if siblings
            .iter()
            .any(|b| b.id != banner_id && b.digest == digest)
        {
            return Err(BannerError::DuplicateImage);
        }

        banner.image_name = upload.file_name;
        banner.digest = digest;
        banner.size_bytes = upload.data.len();
        banner.width = upload.width;
        banner.height = upload.height;

        let saved = self.banner_repo.save(&banner).await?;
        tracing::info!(banner_id, "Banner image changed");
        Ok(saved)
    }

    async fn delete_banner(&self, banner_id: i64) -> Result<(), BannerError> {
        if !self.banner_repo.delete(banner_id).await? {
            return Err(BannerError::NotFound);
        }
        tracing::info!(banner_id, "Banner deleted");
        Ok(())
    }
}
