//! News entity and repository trait.
//!
//! News items are published by agency operators on the eTour portal.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// Publication state of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NewsStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl NewsStatus {
    /// Parse the user-facing label, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A news item shown on the tourist portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub publication_date: NaiveDate,
    pub status: NewsStatus,
}

/// Repository trait for News data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<News>, RepositoryError>;

    /// All news, ordered by id.
    async fn find_all(&self) -> Result<Vec<News>, RepositoryError>;

    /// Insert or overwrite by id.
    async fn save(&self, news: &News) -> Result<News, RepositoryError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
