//! Late Entry Repository Implementation

use async_trait::async_trait;
use chrono::NaiveDate;

use super::memory::MemoryTable;
use crate::domain::{LateEntry, LateEntryRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryLateEntryRepository {
    table: MemoryTable<i64, LateEntry>,
}

impl InMemoryLateEntryRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl LateEntryRepository for InMemoryLateEntryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<LateEntry>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<LateEntry>, RepositoryError> {
        self.table.all().await
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<LateEntry>, RepositoryError> {
        self.table.filter(|e| e.date == date).await
    }

    async fn save(&self, entry: &LateEntry) -> Result<LateEntry, RepositoryError> {
        self.table.upsert(entry.id, entry.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
