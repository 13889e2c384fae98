//! Tourist account entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// A registered tourist of the eTour portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tourist {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl Tourist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match on username, first or last name.
    pub fn matches_name(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.username.to_lowercase().contains(&fragment)
            || self.first_name.to_lowercase().contains(&fragment)
            || self.last_name.to_lowercase().contains(&fragment)
    }
}

#[async_trait]
pub trait TouristRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tourist>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Tourist>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Tourist>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Tourist>, RepositoryError>;

    async fn save(&self, tourist: &Tourist) -> Result<Tourist, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
