//! Classes and teachings of the school, with their repository traits.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

/// A class held at an address during one academic year (`YYYY-YYYY`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub address_id: i64,
    pub academic_year: String,
}

/// A course taught at one or more addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teaching {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub schedule: String,
    pub description: String,

    /// Addresses offering this teaching
    #[serde(default)]
    pub address_ids: BTreeSet<i64>,
}

impl Teaching {
    pub fn is_taught_at(&self, address_id: i64) -> bool {
        self.address_ids.contains(&address_id)
    }
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<SchoolClass>, RepositoryError>;

    /// Classes of one address, ordered by id.
    async fn find_by_address(&self, address_id: i64) -> Result<Vec<SchoolClass>, RepositoryError>;

    async fn save(&self, class: &SchoolClass) -> Result<SchoolClass, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait TeachingRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teaching>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Teaching>, RepositoryError>;

    async fn save(&self, teaching: &Teaching) -> Result<Teaching, RepositoryError>;
}
