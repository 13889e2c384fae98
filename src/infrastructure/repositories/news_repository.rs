//! News Repository Implementation
//!
//! In-memory implementation of the NewsRepository trait, bound to the ETOUR link.

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{News, NewsRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryNewsRepository {
    table: MemoryTable<i64, News>,
}

impl InMemoryNewsRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<News>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<News>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, news: &News) -> Result<News, RepositoryError> {
        self.table.upsert(news.id, news.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
