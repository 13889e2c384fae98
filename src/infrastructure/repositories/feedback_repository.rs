//! Feedback Repository Implementation

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Feedback, FeedbackRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryFeedbackRepository {
    table: MemoryTable<i64, Feedback>,
}

impl InMemoryFeedbackRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_by_site(&self, site_id: i64) -> Result<Vec<Feedback>, RepositoryError> {
        self.table.filter(|f| f.site_id == site_id).await
    }

    async fn find_by_site_and_tourist(
        &self,
        site_id: i64,
        tourist_id: i64,
    ) -> Result<Option<Feedback>, RepositoryError> {
        self.table
            .find(|f| f.site_id == site_id && f.tourist_id == tourist_id)
            .await
    }

    async fn save(&self, feedback: &Feedback) -> Result<Feedback, RepositoryError> {
        self.table.upsert(feedback.id, feedback.clone()).await
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
