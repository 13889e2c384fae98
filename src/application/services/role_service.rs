//! Role Service
//!
//! Lists, assigns and removes the roles of login accounts.

use std::sync::Arc;

use async_trait::async_trait;

use super::OutcomeLabel;
use crate::domain::{Account, AccountRepository, Role};
use crate::shared::error::{RepositoryError, ValidationReport};

/// Role service trait defining all role management operations.
#[async_trait]
pub trait RoleService: Send + Sync {
    async fn list_roles(&self, username: &str) -> Result<Vec<Role>, RoleError>;

    /// Assign a role; returns the account's roles afterwards.
    async fn assign_role(&self, username: &str, role: &str) -> Result<Vec<Role>, RoleError>;

    /// Remove a role; returns the account's roles afterwards.
    async fn remove_role(&self, username: &str, role: &str) -> Result<Vec<Role>, RoleError>;
}

/// Role service errors
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Role {0} already assigned")]
    AlreadyAssigned(Role),

    #[error("Role {0} not assigned")]
    NotAssigned(Role),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for RoleError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::AlreadyAssigned(_) | Self::NotAssigned(_) => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

fn parse_role(value: &str) -> Result<Role, ValidationReport> {
    Role::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
        ValidationReport::single("role", format!("Role must be one of {}", names.join(", ")))
    })
}

/// RoleService implementation
pub struct RoleServiceImpl<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> RoleServiceImpl<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    async fn account(&self, username: &str) -> Result<Account, RoleError> {
        self.account_repo
            .find_by_username(username)
            .await?
            .ok_or(RoleError::AccountNotFound)
    }
}

#[async_trait]
impl<A> RoleService for RoleServiceImpl<A>
where
    A: AccountRepository + 'static,
{
    async fn list_roles(&self, username: &str) -> Result<Vec<Role>, RoleError> {
        let account = self.account(username).await?;
        Ok(account.roles.into_iter().collect())
    }

    async fn assign_role(&self, username: &str, role: &str) -> Result<Vec<Role>, RoleError> {
        let role = parse_role(role)?;
        let mut account = self.account(username).await?;

        if !account.roles.insert(role) {
            return Err(RoleError::AlreadyAssigned(role));
        }
        let saved = self.account_repo.save(&account).await?;

        tracing::info!(username = %saved.username, %role, "Role assigned");
        Ok(saved.roles.into_iter().collect())
    }

    async fn remove_role(&self, username: &str, role: &str) -> Result<Vec<Role>, RoleError> {
        let role = parse_role(role)?;
        let mut account = self.account(username).await?;

        if !account.roles.remove(&role) {
            return Err(RoleError::NotAssigned(role));
        }
        let saved = self.account_repo.save(&account).await?;

        tracing::info!(username = %saved.username, %role, "Role removed");
        Ok(saved.roles.into_iter().collect())
    }
}
