//! Tag Repository Implementation

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Tag, TagRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryTagRepository {
    table: MemoryTable<i64, Tag>,
}

impl InMemoryTagRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Tag>, RepositoryError> {
        self.table.all().await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let name = name.trim();
        self.table.find(|t| t.name.eq_ignore_ascii_case(name)).await
    }

    async fn save(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        self.table.upsert(tag.id, tag.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
