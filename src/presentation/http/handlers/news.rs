//! News Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::NewsForm;
use crate::application::services::{observe, NewsDto, NewsError};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<NewsError> for AppError {
    fn from(e: NewsError) -> Self {
        match e {
            NewsError::NotFound => AppError::NotFound(e.to_string()),
            NewsError::Validation(report) => AppError::Validation(report),
            NewsError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// List all news
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsDto>>, AppError> {
    let news = observe("news.list", state.news.list_news().await)?;
    Ok(Json(news))
}

/// Load one news item into its editable form
pub async fn get_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> Result<Json<NewsDto>, AppError> {
    let id = parse_id(&news_id, "news")?;
    let news = observe("news.load", state.news.load_news(id).await)?;
    Ok(Json(news))
}

/// Insert a news item
pub async fn create_news(
    State(state): State<AppState>,
    Json(body): Json<NewsForm>,
) -> Result<(StatusCode, Json<NewsDto>), AppError> {
    let news = observe("news.insert", state.news.insert_news(body).await)?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// Submit the edited form of a news item
pub async fn update_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
    Json(body): Json<NewsForm>,
) -> Result<Json<NewsDto>, AppError> {
    let id = parse_id(&news_id, "news")?;
    let dto = NewsDto { id, form: body };
    let news = observe("news.submit_edits", state.news.submit_edits(dto).await)?;
    Ok(Json(news))
}

/// Delete a news item
pub async fn delete_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&news_id, "news")?;
    observe("news.delete", state.news.delete_news(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
