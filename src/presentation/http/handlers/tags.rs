//! Tag Handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{TagForm, TagSearchQuery, TagSelection};
use crate::application::services::{observe, TagError};
use crate::domain::Tag;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<TagError> for AppError {
    fn from(e: TagError) -> Self {
        match e {
            TagError::NotFound(_) => AppError::NotFound(e.to_string()),
            TagError::Validation(report) => AppError::Validation(report),
            TagError::Duplicate(_) => AppError::Conflict(e.to_string()),
            TagError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// List tags, optionally filtered by `keyword`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<TagSearchQuery>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = observe("tags.search", state.tags.search(query).await)?;
    Ok(Json(tags))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(body): Json<TagForm>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let tag = observe("tags.insert", state.tags.insert(body).await)?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Delete the selected tags; returns what was deleted
pub async fn delete_selected(
    State(state): State<AppState>,
    Json(body): Json<TagSelection>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let deleted = observe("tags.delete", state.tags.delete_selected(body).await)?;
    Ok(Json(deleted))
}
