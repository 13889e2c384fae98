//! Feedback Service
//!
//! Tourists leave one vote per cultural site and may later change its
//! comment. The site summary aggregates every vote.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::OutcomeLabel;
use crate::application::dto::{CommentForm, FeedbackForm};
use crate::domain::{CulturalHeritageRepository, Feedback, FeedbackRepository, TouristRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait FeedbackService: Send + Sync {
    async fn leave_feedback(&self, site_id: i64, form: FeedbackForm) -> Result<Feedback, FeedbackError>;

    async fn modify_comment(&self, feedback_id: i64, form: CommentForm) -> Result<Feedback, FeedbackError>;

    async fn site_summary(&self, site_id: i64) -> Result<FeedbackSummaryDto, FeedbackError>;
}

/// Aggregate of all feedback left on one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummaryDto {
    pub site_id: i64,
    pub count: usize,

    /// `None` while nobody has voted
    pub average_rating: Option<f64>,

    /// Newest first
    pub entries: Vec<Feedback>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Cultural heritage not found")]
    SiteNotFound,

    #[error("Tourist not found")]
    TouristNotFound,

    #[error("Feedback not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Feedback already released for this site")]
    AlreadyReleased,

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for FeedbackError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::SiteNotFound | Self::TouristNotFound | Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::AlreadyReleased => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct FeedbackServiceImpl<S, T, F>
where
    S: CulturalHeritageRepository,
    T: TouristRepository,
    F: FeedbackRepository,
{
    site_repo: Arc<S>,
    tourist_repo: Arc<T>,
    feedback_repo: Arc<F>,
}

impl<S, T, F> FeedbackServiceImpl<S, T, F>
where
    S: CulturalHeritageRepository,
    T: TouristRepository,
    F: FeedbackRepository,
{
    pub fn new(site_repo: Arc<S>, tourist_repo: Arc<T>, feedback_repo: Arc<F>) -> Self {
        Self {
            site_repo,
            tourist_repo,
            feedback_repo,
        }
    }
}

#[async_trait]
impl<S, T, F> FeedbackService for FeedbackServiceImpl<S, T, F>
where
    S: CulturalHeritageRepository + 'static,
    T: TouristRepository + 'static,
    F: FeedbackRepository + 'static,
{
    async fn leave_feedback(&self, site_id: i64, form: FeedbackForm) -> Result<Feedback, FeedbackError> {
        validate_form(&form)?;

        self.site_repo
            .find_by_id(site_id)
            .await?
            .ok_or(FeedbackError::SiteNotFound)?;
        self.tourist_repo
            .find_by_id(form.tourist_id)
            .await?
            .ok_or(FeedbackError::TouristNotFound)?;

        if self
            .feedback_repo
            .find_by_site_and_tourist(site_id, form.tourist_id)
            .await?
            .is_some()
        {
            return Err(FeedbackError::AlreadyReleased);
        }

        let now = Utc::now();
        let feedback = Feedback {
            id: self.feedback_repo.next_id().await?,
            site_id,
            tourist_id: form.tourist_id,
            rating: form.rating,
            comment: form.comment.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let saved = self.feedback_repo.save(&feedback).await?;
        tracing::info!(
            feedback_id = saved.id,
            site_id,
            tourist_id = saved.tourist_id,
            rating = saved.rating,
            "Feedback released"
        );
        Ok(saved)
    }

    async fn modify_comment(&self, feedback_id: i64, form: CommentForm) -> Result<Feedback, FeedbackError> {
        validate_form(&form)?;

        let mut feedback = self
            .feedback_repo
            .find_by_id(feedback_id)
            .await?
            .ok_or(FeedbackError::NotFound)?;

        feedback.comment = form.comment.trim().to_string();
        feedback.updated_at = Utc::now();

        Ok(self.feedback_repo.save(&feedback).await?)
    }

    async fn site_summary(&self, site_id: i64) -> Result<FeedbackSummaryDto, FeedbackError> {
        self.site_repo
            .find_by_id(site_id)
            .await?
            .ok_or(FeedbackError::SiteNotFound)?;

        let mut entries = self.feedback_repo.find_by_site(site_id).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let count = entries.len();
        let average_rating = (count > 0).then(|| {
            entries.iter().map(|f| f64::from(f.rating)).sum::<f64>() / count as f64
        });

        Ok(FeedbackSummaryDto {
            site_id,
            count,
            average_rating,
            entries,
        })
    }
}
