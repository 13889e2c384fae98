//! Refreshment Point and Banner Repository Implementations

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Banner, BannerRepository, RefreshmentPoint, RefreshmentPointRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryRefreshmentPointRepository {
    table: MemoryTable<i64, RefreshmentPoint>,
}

impl InMemoryRefreshmentPointRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl RefreshmentPointRepository for InMemoryRefreshmentPointRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<RefreshmentPoint>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<RefreshmentPoint>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, point: &RefreshmentPoint) -> Result<RefreshmentPoint, RepositoryError> {
        self.table.upsert(point.id, point.clone()).await
    }
}

pub struct InMemoryBannerRepository {
    table: MemoryTable<i64, Banner>,
}

impl InMemoryBannerRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl BannerRepository for InMemoryBannerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Banner>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Banner>, RepositoryError> {
        self.table.all().await
    }

    async fn find_by_point(&self, point_id: i64) -> Result<Vec<Banner>, RepositoryError> {
        self.table.filter(|b| b.point_id == point_id).await
    }

    async fn save(&self, banner: &Banner) -> Result<Banner, RepositoryError> {
        self.table.upsert(banner.id, banner.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
