//! Refreshment Point Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::dto::{PointSearchQuery, RefreshmentPointForm};
use crate::application::services::{observe, PointError};
use crate::domain::RefreshmentPoint;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<PointError> for AppError {
    fn from(e: PointError) -> Self {
        match e {
            PointError::NotFound => AppError::NotFound(e.to_string()),
            PointError::Validation(report) => AppError::Validation(report),
            PointError::Duplicate { .. } => AppError::Conflict(e.to_string()),
            PointError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Search points by `name` and `city`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<PointSearchQuery>,
) -> Result<Json<Vec<RefreshmentPoint>>, AppError> {
    let points = observe("points.search", state.points.search(query).await)?;
    Ok(Json(points))
}

/// View a point's card
pub async fn view(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
) -> Result<Json<RefreshmentPoint>, AppError> {
    let id = parse_id(&point_id, "refreshment point")?;
    let point = observe("points.view", state.points.view(id).await)?;
    Ok(Json(point))
}

/// Modify a point's card
pub async fn modify(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
    Json(body): Json<RefreshmentPointForm>,
) -> Result<Json<RefreshmentPoint>, AppError> {
    let id = parse_id(&point_id, "refreshment point")?;
    let point = observe("points.modify", state.points.modify(id, body).await)?;
    Ok(Json(point))
}
