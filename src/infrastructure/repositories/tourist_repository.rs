//! Tourist Repository Implementation

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Tourist, TouristRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryTouristRepository {
    table: MemoryTable<i64, Tourist>,
}

impl InMemoryTouristRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl TouristRepository for InMemoryTouristRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tourist>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Tourist>, RepositoryError> {
        self.table.all().await
    }

    /// Usernames compare case-insensitively.
    async fn find_by_username(&self, username: &str) -> Result<Option<Tourist>, RepositoryError> {
        self.table
            .find(|t| t.username.eq_ignore_ascii_case(username))
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Tourist>, RepositoryError> {
        self.table.find(|t| t.email.eq_ignore_ascii_case(email)).await
    }

    async fn save(&self, tourist: &Tourist) -> Result<Tourist, RepositoryError> {
        self.table.upsert(tourist.id, tourist.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
