//! Absence and justification entities with their repository traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub justified: bool,
}

/// The reason given for an absence. At most one per absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub id: i64,
    pub absence_id: i64,
    pub reason: String,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait AbsenceRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Absence>, RepositoryError>;

    async fn find_by_student(&self, student_id: i64) -> Result<Vec<Absence>, RepositoryError>;

    async fn save(&self, absence: &Absence) -> Result<Absence, RepositoryError>;
}

#[async_trait]
pub trait JustificationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Justification>, RepositoryError>;

    async fn find_by_absence(
        &self,
        absence_id: i64,
    ) -> Result<Option<Justification>, RepositoryError>;

    async fn save(&self, justification: &Justification) -> Result<Justification, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
