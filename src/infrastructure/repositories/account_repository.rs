//! Account Repository Implementation
//!
//! Accounts live on the SMOS link; both desks authenticate against it.

use async_trait::async_trait;

use super::memory::MemoryTable;
use crate::domain::{Account, AccountRepository};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

pub struct InMemoryAccountRepository {
    table: MemoryTable<String, Account>,
}

impl InMemoryAccountRepository {
    pub fn new(link: ServerLink) -> Self {
        Self {
            table: MemoryTable::new(link),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        self.table.get(&username.to_lowercase()).await
    }

    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
        self.table.all().await
    }

    async fn save(&self, account: &Account) -> Result<Account, RepositoryError> {
        self.table
            .upsert(account.username.to_lowercase(), account.clone())
            .await
    }
}
