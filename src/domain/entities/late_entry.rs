//! Late entry (delay) entity and repository trait.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// A student entering class after the bell, as recorded in the class register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateEntry {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub entry_time: NaiveTime,
    pub note: Option<String>,
}

#[async_trait]
pub trait LateEntryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<LateEntry>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<LateEntry>, RepositoryError>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<LateEntry>, RepositoryError>;

    async fn save(&self, entry: &LateEntry) -> Result<LateEntry, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
