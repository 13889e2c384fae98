//! Daily Menu Repository Implementation
//!
//! Rows are keyed by point id and Monday-first day index.

use async_trait::async_trait;
use chrono::Weekday;

use super::memory::MemoryTable;
use crate::domain::{day_index, DailyMenu, MenuRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryMenuRepository {
    table: MemoryTable<(i64, u8), DailyMenu>,
}

impl InMemoryMenuRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find(&self, point_id: i64, day: Weekday) -> Result<Option<DailyMenu>, RepositoryError> {
        self.table.get(&(point_id, day_index(day))).await
    }

    async fn find_by_point(&self, point_id: i64) -> Result<Vec<DailyMenu>, RepositoryError> {
        self.table.filter(|m| m.point_id == point_id).await
    }

    async fn save(&self, menu: &DailyMenu) -> Result<DailyMenu, RepositoryError> {
        self.table
            .upsert((menu.point_id, day_index(menu.day)), menu.clone())
            .await
    }

    async fn delete(&self, point_id: i64, day: Weekday) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&(point_id, day_index(day))).await?.is_some())
    }
}
