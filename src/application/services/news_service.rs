//! News Service
//!
//! Insert, edit, delete and list news items of the eTour portal.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::OutcomeLabel;
use crate::application::dto::NewsForm;
use crate::domain::{News, NewsRepository, NewsStatus};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::{parse_date, validate_form, DATE_FORMAT};

/// News service trait
#[async_trait]
pub trait NewsService: Send + Sync {
    /// All news items, ordered by id
    async fn list_news(&self) -> Result<Vec<NewsDto>, NewsError>;

    /// Load a news item into an editable form
    async fn load_news(&self, id: i64) -> Result<NewsDto, NewsError>;

    /// Validate and store an edited news item
    async fn submit_edits(&self, dto: NewsDto) -> Result<NewsDto, NewsError>;

    /// Validate and store a new news item under a fresh id
    async fn insert_news(&self, form: NewsForm) -> Result<NewsDto, NewsError>;

    async fn delete_news(&self, id: i64) -> Result<(), NewsError>;
}

/// An editable news item: its id plus the form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDto {
    pub id: i64,
    #[serde(flatten)]
    pub form: NewsForm,
}

impl From<News> for NewsDto {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            form: NewsForm {
                title: news.title,
                content: news.content,
                author: news.author,
                publication_date: news.publication_date.format(DATE_FORMAT).to_string(),
                status: news.status.to_string(),
            },
        }
    }
}

/// News service errors
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("News not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for NewsError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::Connection(_) => "connection",
        }
    }
}

/// Validate `form` and turn it into the entity stored under `id`.
fn news_from_form(id: i64, form: &NewsForm) -> Result<News, NewsError> {
    validate_form(form)?;

    let publication_date = parse_date(&form.publication_date).ok_or_else(|| {
        ValidationReport::single(
            "publication_date",
            "Publication date must be in YYYY-MM-DD format",
        )
    })?;
    let status = NewsStatus::parse(&form.status).ok_or_else(|| {
        ValidationReport::single("status", "Status must be one of Draft, Published, Archived")
    })?;

    Ok(News {
        id,
        title: form.title.trim().to_string(),
        content: form.content.trim().to_string(),
        author: form.author.trim().to_string(),
        publication_date,
        status,
    })
}

/// NewsService implementation
pub struct NewsServiceImpl<R>
where
    R: NewsRepository,
{
    news_repo: Arc<R>,
}

impl<R> NewsServiceImpl<R>
where
    R: NewsRepository,
{
    pub fn new(news_repo: Arc<R>) -> Self {
        Self { news_repo }
    }
}

#[async_trait]
impl<R> NewsService for NewsServiceImpl<R>
where
    R: NewsRepository + 'static,
{
    async fn list_news(&self) -> Result<Vec<NewsDto>, NewsError> {
        let news = self.news_repo.find_all().await?;
        Ok(news.into_iter().map(NewsDto::from).collect())
    }

    async fn load_news(&self, id: i64) -> Result<NewsDto, NewsError> {
        let news = self
            .news_repo
            .find_by_id(id)
            .await?
            .ok_or(NewsError::NotFound)?;

        Ok(NewsDto::from(news))
    }

    async fn submit_edits(&self, dto: NewsDto) -> Result<NewsDto, NewsError> {
        // Validate before anything else so a bad form never reaches storage
        let news = news_from_form(dto.id, &dto.form)?;

        if self.news_repo.find_by_id(dto.id).await?.is_none() {
            return Err(NewsError::NotFound);
        }

        let saved = self.news_repo.save(&news).await?;
        tracing::info!(news_id = saved.id, "News updated");
        Ok(NewsDto::from(saved))
    }

    async fn insert_news(&self, form: NewsForm) -> Result<NewsDto, NewsError> {
        // Id 0 is a placeholder until the form is known to be valid
        let mut news = news_from_form(0, &form)?;
        news.id = self.news_repo.next_id().await?;

        let saved = self.news_repo.save(&news).await?;
        tracing::info!(news_id = saved.id, "News inserted");
        Ok(NewsDto::from(saved))
    }

    async fn delete_news(&self, id: i64) -> Result<(), NewsError> {
        if !self.news_repo.delete(id).await? {
            return Err(NewsError::NotFound);
        }
        tracing::info!(news_id = id, "News deleted");
        Ok(())
    }
}
