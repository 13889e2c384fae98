//! Class and Teaching Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{ClassForm, ClassQuery, TeachingAssignmentForm};
use crate::application::services::{observe, AddressTeachingsDto, ClassError};
use crate::domain::{SchoolClass, Teaching};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<ClassError> for AppError {
    fn from(e: ClassError) -> Self {
        match e {
            ClassError::AddressNotFound | ClassError::TeachingNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            ClassError::Validation(report) => AppError::Validation(report),
            ClassError::Duplicate { .. } => AppError::Conflict(e.to_string()),
            ClassError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Classes of an address, filtered by `academic_year` when given
pub async fn list_classes(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    Query(query): Query<ClassQuery>,
) -> Result<Json<Vec<SchoolClass>>, AppError> {
    let id = parse_id(&address_id, "address")?;
    let classes = observe("classes.list", state.classes.list_classes(id, query).await)?;
    Ok(Json(classes))
}

pub async fn insert_class(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    Json(body): Json<ClassForm>,
) -> Result<(StatusCode, Json<SchoolClass>), AppError> {
    let id = parse_id(&address_id, "address")?;
    let class = observe("classes.insert", state.classes.insert_class(id, body).await)?;
    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn teachings_of(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<Json<AddressTeachingsDto>, AppError> {
    let id = parse_id(&address_id, "address")?;
    let overview = observe("teachings.list", state.classes.teachings_of(id).await)?;
    Ok(Json(overview))
}

/// Assign and remove teachings of an address in one request
pub async fn update_teachings(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    Json(body): Json<TeachingAssignmentForm>,
) -> Result<Json<AddressTeachingsDto>, AppError> {
    let id = parse_id(&address_id, "address")?;
    let overview = observe(
        "teachings.update",
        state.classes.update_teachings(id, body).await,
    )?;
    Ok(Json(overview))
}

pub async fn view_teaching(
    State(state): State<AppState>,
    Path(teaching_id): Path<String>,
) -> Result<Json<Teaching>, AppError> {
    let id = parse_id(&teaching_id, "teaching")?;
    let teaching = observe("teachings.view", state.classes.view_teaching(id).await)?;
    Ok(Json(teaching))
}
