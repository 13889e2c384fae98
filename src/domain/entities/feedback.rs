//! Feedback entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A tourist's vote and comment on a cultural site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub site_id: i64,
    pub tourist_id: i64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>, RepositoryError>;

    async fn find_by_site(&self, site_id: i64) -> Result<Vec<Feedback>, RepositoryError>;

    async fn find_by_site_and_tourist(
        &self,
        site_id: i64,
        tourist_id: i64,
    ) -> Result<Option<Feedback>, RepositoryError>;

    async fn save(&self, feedback: &Feedback) -> Result<Feedback, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
