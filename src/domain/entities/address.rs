//! Address entity and repository trait.
//!
//! Addresses are school sites; classes are held at an address.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub name: String,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,

    /// Names of the classes held at this address
    #[serde(default)]
    pub associated_classes: Vec<String>,
}

impl Address {
    pub fn full_address(&self) -> String {
        format!(
            "{}, {} {}, {}",
            self.street, self.zip_code, self.city, self.country
        )
    }

    pub fn has_classes(&self) -> bool {
        !self.associated_classes.is_empty()
    }
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Address>, RepositoryError>;

    async fn save(&self, address: &Address) -> Result<Address, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn next_id(&self) -> Result<i64, RepositoryError>;
}
