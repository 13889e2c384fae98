//! Enrollment Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::services::{observe, EnrollmentError};
use crate::domain::{RegistrationRequest, Student};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<EnrollmentError> for AppError {
    fn from(e: EnrollmentError) -> Self {
        match e {
            EnrollmentError::NotFound => AppError::NotFound(e.to_string()),
            EnrollmentError::AlreadyProcessed(_) => AppError::Conflict(e.to_string()),
            EnrollmentError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Registration requests still waiting for a decision
pub async fn pending_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationRequest>>, AppError> {
    let requests = observe(
        "enrollments.pending",
        state.enrollments.pending_requests().await,
    )?;
    Ok(Json(requests))
}

/// Accept a request; responds with the activated student
pub async fn accept(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&request_id, "registration request")?;
    let student = observe("enrollments.accept", state.enrollments.accept(id).await)?;
    Ok(Json(student))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<RegistrationRequest>, AppError> {
    let id = parse_id(&request_id, "registration request")?;
    let request = observe("enrollments.reject", state.enrollments.reject(id).await)?;
    Ok(Json(request))
}
