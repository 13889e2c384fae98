//! Cultural Heritage Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{CulturalHeritageForm, HeritageSearchQuery};
use crate::application::services::{observe, HeritageError};
use crate::domain::CulturalHeritage;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<HeritageError> for AppError {
    fn from(e: HeritageError) -> Self {
        match e {
            HeritageError::NotFound => AppError::NotFound(e.to_string()),
            HeritageError::Validation(report) => AppError::Validation(report),
            HeritageError::Duplicate { .. } => AppError::Conflict(e.to_string()),
            HeritageError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Search sites by `keyword` and `city`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<HeritageSearchQuery>,
) -> Result<Json<Vec<CulturalHeritage>>, AppError> {
    let sites = observe("heritage.search", state.heritage.search(query).await)?;
    Ok(Json(sites))
}

/// View one site
pub async fn view(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<Json<CulturalHeritage>, AppError> {
    let id = parse_id(&site_id, "cultural heritage")?;
    let site = observe("heritage.view", state.heritage.view(id).await)?;
    Ok(Json(site))
}

/// Insert a site
pub async fn insert(
    State(state): State<AppState>,
    Json(body): Json<CulturalHeritageForm>,
) -> Result<(StatusCode, Json<CulturalHeritage>), AppError> {
    let site = observe("heritage.insert", state.heritage.insert(body).await)?;
    Ok((StatusCode::CREATED, Json(site)))
}

/// Modify a site
pub async fn modify(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    Json(body): Json<CulturalHeritageForm>,
) -> Result<Json<CulturalHeritage>, AppError> {
    let id = parse_id(&site_id, "cultural heritage")?;
    let site = observe("heritage.modify", state.heritage.modify(id, body).await)?;
    Ok(Json(site))
}

/// Delete a site
pub async fn delete(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&site_id, "cultural heritage")?;
    observe("heritage.delete", state.heritage.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
