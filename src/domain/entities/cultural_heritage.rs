//! Cultural heritage entity and repository trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// A cultural site (museum, monument, church...) listed on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalHeritage {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub kind: String,
    pub description: String,
    pub opening_hours: Option<String>,
}

impl CulturalHeritage {
    /// Case-insensitive match of `keyword` against name and description.
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }

    pub fn is_in(&self, city: &str) -> bool {
        self.city.eq_ignore_ascii_case(city.trim())
    }
}

#[async_trait]
pub trait CulturalHeritageRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<CulturalHeritage>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<CulturalHeritage>, RepositoryError>;

    async fn save(&self, site: &CulturalHeritage) -> Result<CulturalHeritage, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
