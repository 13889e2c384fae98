//! Address Repository Implementation

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Address, AddressRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryAddressRepository {
    table: MemoryTable<i64, Address>,
}

impl InMemoryAddressRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Address>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, address: &Address) -> Result<Address, RepositoryError> {
        self.table.upsert(address.id, address.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
