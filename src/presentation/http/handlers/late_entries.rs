//! Late Entry Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{LateEntryForm, LateEntryQuery};
use crate::application::services::{observe, LateEntryError};
use crate::domain::LateEntry;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<LateEntryError> for AppError {
    fn from(e: LateEntryError) -> Self {
        match e {
            LateEntryError::NotFound | LateEntryError::StudentNotFound => {
                AppError::NotFound(e.to_string())
            }
            LateEntryError::Validation(report) => AppError::Validation(report),
            LateEntryError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Late entries of the register for `?date=YYYY-MM-DD`
pub async fn list_by_date(
    State(state): State<AppState>,
    Query(query): Query<LateEntryQuery>,
) -> Result<Json<Vec<LateEntry>>, AppError> {
    let entries = observe(
        "late_entries.list",
        state.late_entries.list_by_date(&query.date).await,
    )?;
    Ok(Json(entries))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(body): Json<LateEntryForm>,
) -> Result<(StatusCode, Json<LateEntry>), AppError> {
    let entry = observe("late_entries.insert", state.late_entries.insert(body).await)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(body): Json<LateEntryForm>,
) -> Result<Json<LateEntry>, AppError> {
    let id = parse_id(&entry_id, "late entry")?;
    let entry = observe("late_entries.edit", state.late_entries.edit(id, body).await)?;
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&entry_id, "late entry")?;
    observe("late_entries.delete", state.late_entries.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
