//! Registration Request and Student Repository Implementations

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{RegistrationRequest, RegistrationRequestRepository, Student, StudentRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryRegistrationRequestRepository {
    table: MemoryTable<i64, RegistrationRequest>,
}

impl InMemoryRegistrationRequestRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl RegistrationRequestRepository for InMemoryRegistrationRequestRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<RegistrationRequest>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<RegistrationRequest>, RepositoryError> {
        self.table.all().await
    }

    async fn save(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationRequest, RepositoryError> {
        self.table.upsert(request.id, request.clone()).await
    }
}

pub struct InMemoryStudentRepository {
    table: MemoryTable<i64, Student>,
}

impl InMemoryStudentRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, RepositoryError> {
        self.table.get(&id).await
    }

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, student: &Student) -> Result<Student, RepositoryError> {
        self.table.upsert(student.id, student.clone()).await
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.table.next_id().await
    }
}
