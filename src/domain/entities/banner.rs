//! Refreshment point and banner entities with their repository traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// Whether a refreshment point is currently serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PointStatus {
    #[default]
    Open,
    Closed,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl PointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::UnderMaintenance => "Under Maintenance",
        }
    }

    /// Case-insensitive parse of the display form.
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Open, Self::Closed, Self::UnderMaintenance]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for PointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restaurant or bar registered with the agency.
///
/// `max_banners` is agreed per point in its convention with the agency and
/// is not editable from the point's card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshmentPoint {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub max_banners: usize,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: PointStatus,
    /// Seats available
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub opening_hours: Option<String>,
}

impl RefreshmentPoint {
    /// A point with only the fields banner and menu management care about.
    pub fn new(id: i64, name: impl Into<String>, city: impl Into<String>, max_banners: usize) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            max_banners,
            address: String::new(),
            status: PointStatus::Open,
            capacity: None,
            opening_hours: None,
        }
    }

    pub fn matches_name(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }

    pub fn is_in(&self, city: &str) -> bool {
        self.city.eq_ignore_ascii_case(city.trim())
    }
}

/// An advertising image attached to a refreshment point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub point_id: i64,
    pub image_name: String,

    /// Hex SHA-256 of the image bytes
    pub digest: String,

    pub size_bytes: usize,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait RefreshmentPointRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<RefreshmentPoint>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<RefreshmentPoint>, RepositoryError>;

    async fn save(&self, point: &RefreshmentPoint) -> Result<RefreshmentPoint, RepositoryError>;
}

#[async_trait]
pub trait BannerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Banner>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Banner>, RepositoryError>;

    /// Banners of one point, ordered by id.
    async fn find_by_point(&self, point_id: i64) -> Result<Vec<Banner>, RepositoryError>;

    async fn save(&self, banner: &Banner) -> Result<Banner, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
