//! Daily menu entity and repository trait.

use async_trait::async_trait;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// The menu a refreshment point serves on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMenu {
    pub point_id: i64,
    pub day: Weekday,
    pub dishes: Vec<String>,
    pub special_notes: String,
}

/// Weekday in Monday-first order, usable as a sort key.
pub fn day_index(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find(&self, point_id: i64, day: Weekday) -> Result<Option<DailyMenu>, RepositoryError>;

    /// Menus of one point, Monday first.
    async fn find_by_point(&self, point_id: i64) -> Result<Vec<DailyMenu>, RepositoryError>;

    async fn save(&self, menu: &DailyMenu) -> Result<DailyMenu, RepositoryError>;

    async fn delete(&self, point_id: i64, day: Weekday) -> Result<bool, RepositoryError>;
}
