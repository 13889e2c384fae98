//! Enrollment controller: review pending registration requests.

use std::sync::Arc;

use super::{describe, Notifier};
use crate::application::services::EnrollmentService;
use crate::domain::{RegistrationRequest, Student};

pub struct EnrollmentController {
    service: Arc<dyn EnrollmentService>,
    notifier: Arc<dyn Notifier>,
}

impl EnrollmentController {
    pub fn new(service: Arc<dyn EnrollmentService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { service, notifier }
    }

    pub async fn show_pending(&self) -> Vec<RegistrationRequest> {
        match self.service.pending_requests().await {
            Ok(requests) => {
                self.notifier
                    .info(&format!("{} pending registration request(s)", requests.len()));
                requests
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                Vec::new()
            }
        }
    }

    pub async fn accept(&self, request_id: i64) -> Option<Student> {
        match self.service.accept(request_id).await {
            Ok(student) => {
                self.notifier
                    .success(&format!("Request accepted: {} is now enrolled", student.name));
                Some(student)
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                None
            }
        }
    }

    pub async fn reject(&self, request_id: i64) -> bool {
        match self.service.reject(request_id).await {
            Ok(request) => {
                self.notifier
                    .success(&format!("Request of {} rejected", request.student_name));
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }
}
