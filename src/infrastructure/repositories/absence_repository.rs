//! Absence and Justification Repository Implementations

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Absence, AbsenceRepository, Justification, JustificationRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryAbsenceRepository {
    table: MemoryTable<i64, Absence>,
}

impl InMemoryAbsenceRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl AbsenceRepository for InMemoryAbsenceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Absence>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_by_student(&self, student_id: i64) -> Result<Vec<Absence>, RepositoryError> {
        self.table.filter(|a| a.student_id == student_id).await
    }

    async fn save(&self, absence: &Absence) -> Result<Absence, RepositoryError> {
        self.table.upsert(absence.id, absence.clone()).await
    }
}

pub struct InMemoryJustificationRepository {
    table: MemoryTable<i64, Justification>,
}

impl InMemoryJustificationRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl JustificationRepository for InMemoryJustificationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Justification>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_by_absence(
        &self,
        absence_id: i64,
    ) -> Result<Option<Justification>, RepositoryError> {
        self.table.find(|j| j.absence_id == absence_id).await
    }

    async fn save(&self, justification: &Justification) -> Result<Justification, RepositoryError> {
        self.table
            .upsert(justification.id, justification.clone())
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.remove(&id).await?.is_some())
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
