//! Cultural Heritage Repository Implementation

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{CulturalHeritage, CulturalHeritageRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryCulturalHeritageRepository {
    table: MemoryTable<i64, CulturalHeritage>,
}

impl InMemoryCulturalHeritageRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl CulturalHeritageRepository for InMemoryCulturalHeritageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<CulturalHeritage>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<CulturalHeritage>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, site: &CulturalHeritage) -> Result<CulturalHeritage, RepositoryError> {
        self.table.upsert(site.id, site.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
