//! Enrollment Service
//!
//! Office staff review pending registration requests and accept (creating
//! an active student) or reject them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::OutcomeLabel;
use crate::domain::{
    RegistrationRequest, RegistrationRequestRepository, RequestStatus, Student, StudentRepository,
};
use crate::shared::error::RepositoryError;

#[async_trait]
pub trait EnrollmentService: Send + Sync {
    async fn pending_requests(&self) -> Result<Vec<RegistrationRequest>, EnrollmentError>;

    /// Accept a pending request, activating the student
    async fn accept(&self, request_id: i64) -> Result<Student, EnrollmentError>;

    async fn reject(&self, request_id: i64) -> Result<RegistrationRequest, EnrollmentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("Registration request not found")]
    NotFound,

    #[error("Registration request already {0}")]
    AlreadyProcessed(RequestStatus),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for EnrollmentError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyProcessed(_) => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct EnrollmentServiceImpl<Q, S>
where
    Q: RegistrationRequestRepository,
    S: StudentRepository,
{
    request_repo: Arc<Q>,
    student_repo: Arc<S>,
    // Held from the pending check until the request is written back.
    review_lock: tokio::sync::Mutex<()>,
}

impl<Q, S> EnrollmentServiceImpl<Q, S>
where
    Q: RegistrationRequestRepository,
    S: StudentRepository,
{
    pub fn new(request_repo: Arc<Q>, student_repo: Arc<S>) -> Self {
        Self {
            request_repo,
            student_repo,
            review_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn pending(&self, request_id: i64) -> Result<RegistrationRequest, EnrollmentError> {
        let request = self
            .request_repo
            .find_by_id(request_id)
            .await?
            .ok_or(EnrollmentError::NotFound)?;

        if !request.is_pending() {
            return Err(EnrollmentError::AlreadyProcessed(request.status));
        }
        Ok(request)
    }
}

#[async_trait]
impl<Q, S> EnrollmentService for EnrollmentServiceImpl<Q, S>
where
    Q: RegistrationRequestRepository + 'static,
    S: StudentRepository + 'static,
{
    async fn pending_requests(&self) -> Result<Vec<RegistrationRequest>, EnrollmentError> {
        let requests = self.request_repo.find_all().await?;
        Ok(requests.into_iter().filter(|r| r.is_pending()).collect())
    }

    async fn accept(&self, request_id: i64) -> Result<Student, EnrollmentError> {
        let _guard = self.review_lock.lock().await;
        let mut request = self.pending(request_id).await?;

        // Closing the request first means a retry can never enroll twice.
        request.status = RequestStatus::Accepted;
        self.request_repo.save(&request).await?;

        let created = async {
            let student = Student {
                id: self.student_repo.next_id().await?,
                name: request.student_name.clone(),
                email: request.email.clone(),
                active: true,
                enrolled_at: Utc::now(),
            };
            self.student_repo.save(&student).await
        }
        .await;

        let student = match created {
            Ok(student) => student,
            Err(e) => {
                request.status = RequestStatus::Pending;
                if let Err(undo) = self.request_repo.save(&request).await {
                    tracing::warn!(request_id, error = %undo, "Could not reopen registration request");
                }
                return Err(e.into());
            }
        };

        tracing::info!(request_id, student_id = student.id, "Registration accepted");
        Ok(student)
    }

    async fn reject(&self, request_id: i64) -> Result<RegistrationRequest, EnrollmentError> {
        let _guard = self.review_lock.lock().await;
        let mut request = self.pending(request_id).await?;
        request.status = RequestStatus::Rejected;

        let saved = self.request_repo.save(&request).await?;
        tracing::info!(request_id, "Registration rejected");
        Ok(saved)
    }
}
