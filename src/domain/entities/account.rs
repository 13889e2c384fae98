//! Login account entity and repository trait.
//!
//! Accounts are shared by operators of both desks (agency staff, school
//! office staff, teachers).

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Role;
use crate::shared::error::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub display_name: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub roles: BTreeSet<Role>,

    /// Disabled accounts cannot log in regardless of password
    pub enabled: bool,

    /// Consecutive wrong passwords since the last successful login
    pub failed_attempts: u32,
}

impl Account {
    pub fn is_locked(&self, max_failed_attempts: u32) -> bool {
        self.failed_attempts >= max_failed_attempts
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError>;

    async fn save(&self, account: &Account) -> Result<Account, RepositoryError>;
}
