//! Absence and Justification Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::JustificationForm;
use crate::application::services::{observe, AbsenceDto, JustificationError};
use crate::domain::Justification;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<JustificationError> for AppError {
    fn from(e: JustificationError) -> Self {
        match e {
            JustificationError::StudentNotFound
            | JustificationError::AbsenceNotFound
            | JustificationError::NotFound => AppError::NotFound(e.to_string()),
            JustificationError::AlreadyJustified => AppError::Conflict(e.to_string()),
            JustificationError::Validation(report) => AppError::Validation(report),
            JustificationError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Absences of a student, each with its justification if any
pub async fn absences_of(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<AbsenceDto>>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    let absences = observe(
        "justifications.absences",
        state.justifications.absences_of(student_id).await,
    )?;
    Ok(Json(absences))
}

pub async fn justify(
    State(state): State<AppState>,
    Path(absence_id): Path<String>,
    Json(body): Json<JustificationForm>,
) -> Result<(StatusCode, Json<Justification>), AppError> {
    let absence_id = parse_id(&absence_id, "absence")?;
    let justification = observe(
        "justifications.justify",
        state.justifications.justify(absence_id, body).await,
    )?;
    Ok((StatusCode::CREATED, Json(justification)))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(absence_id): Path<String>,
    Json(body): Json<JustificationForm>,
) -> Result<Json<Justification>, AppError> {
    let absence_id = parse_id(&absence_id, "absence")?;
    let justification = observe(
        "justifications.edit",
        state.justifications.edit(absence_id, body).await,
    )?;
    Ok(Json(justification))
}

/// Delete a justification, marking the absence unjustified again
pub async fn delete(
    State(state): State<AppState>,
    Path(absence_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let absence_id = parse_id(&absence_id, "absence")?;
    observe(
        "justifications.delete",
        state.justifications.delete(absence_id).await,
    )?;
    Ok(StatusCode::NO_CONTENT)
}
