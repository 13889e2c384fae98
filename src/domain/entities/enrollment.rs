//! Enrollment requests, students and their repository traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prospective student's request to join the school system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub id: i64,
    pub student_name: String,
    pub email: String,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl RegistrationRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub enrolled_at: DateTime<Utc>,
}

#[async_trait]
pub trait RegistrationRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<RegistrationRequest>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<RegistrationRequest>, RepositoryError>;

    async fn save(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationRequest, RepositoryError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError>;

    async fn save(&self, student: &Student) -> Result<Student, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
