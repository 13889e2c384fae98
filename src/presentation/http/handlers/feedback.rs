//! Feedback Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{CommentForm, FeedbackForm};
use crate::application::services::{observe, FeedbackError, FeedbackSummaryDto};
use crate::domain::Feedback;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<FeedbackError> for AppError {
    fn from(e: FeedbackError) -> Self {
        match e {
            FeedbackError::SiteNotFound | FeedbackError::TouristNotFound | FeedbackError::NotFound => {
                AppError::NotFound(e.to_string())
            }
            FeedbackError::Validation(report) => AppError::Validation(report),
            FeedbackError::AlreadyReleased => AppError::Conflict(e.to_string()),
            FeedbackError::Connection(e) => AppError::Connection(e),
        }
    }
}

/// Votes of a site with their average
pub async fn site_summary(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<Json<FeedbackSummaryDto>, AppError> {
    let site_id = parse_id(&site_id, "cultural heritage")?;
    let summary = observe("feedback.summary", state.feedback.site_summary(site_id).await)?;
    Ok(Json(summary))
}

/// Leave a vote on a site
pub async fn leave_feedback(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    Json(body): Json<FeedbackForm>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    let site_id = parse_id(&site_id, "cultural heritage")?;
    let feedback = observe(
        "feedback.leave",
        state.feedback.leave_feedback(site_id, body).await,
    )?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Change the comment of a vote
pub async fn modify_comment(
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
    Json(body): Json<CommentForm>,
) -> Result<Json<Feedback>, AppError> {
    let feedback_id = parse_id(&feedback_id, "feedback")?;
    let feedback = observe(
        "feedback.modify_comment",
        state.feedback.modify_comment(feedback_id, body).await,
    )?;
    Ok(Json(feedback))
}
