//! Class and Teaching Repository Implementations

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{ClassRepository, SchoolClass, Teaching, TeachingRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryClassRepository {
    table: MemoryTable<i64, SchoolClass>,
}

impl InMemoryClassRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<SchoolClass>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_by_address(&self, address_id: i64) -> Result<Vec<SchoolClass>, RepositoryError> {
        self.table.filter(|c| c.address_id == address_id).await
    }

    async fn save(&self, class: &SchoolClass) -> Result<SchoolClass, RepositoryError> {
        self.table.upsert(class.id, class.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}

pub struct InMemoryTeachingRepository {
    table: MemoryTable<i64, Teaching>,
}

impl InMemoryTeachingRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl TeachingRepository for InMemoryTeachingRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teaching>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Teaching>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, teaching: &Teaching) -> Result<Teaching, RepositoryError> {
        self.table.upsert(teaching.id, teaching.clone()).await
    }
}
