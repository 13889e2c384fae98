//! Tourist Service
//!
//! Registration, search, view, modify and delete of tourist accounts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::OutcomeLabel;
use crate::application::dto::{
    PasswordChangeForm, TouristRegistrationForm, TouristSearchQuery, TouristUpdateForm,
};
use crate::domain::{Tourist, TouristRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::password::{hash_password, verify_password};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait TouristService: Send + Sync {
    async fn register(&self, form: TouristRegistrationForm) -> Result<Tourist, TouristError>;

    async fn search(&self, query: TouristSearchQuery) -> Result<Vec<Tourist>, TouristError>;

    async fn view(&self, id: i64) -> Result<Tourist, TouristError>;

    async fn modify(&self, id: i64, form: TouristUpdateForm) -> Result<Tourist, TouristError>;

    /// Replace the password after checking the current one
    async fn change_password(&self, id: i64, form: PasswordChangeForm) -> Result<(), TouristError>;

    async fn delete(&self, id: i64) -> Result<(), TouristError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TouristError {
    #[error("Tourist not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error(transparent)]
    Connection(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutcomeLabel for TouristError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::UsernameTaken | Self::EmailTaken => "refused",
            Self::Connection(_) => "connection",
            Self::Internal(_) => "internal",
        }
    }
}

fn clean_phone(phone: Option<String>) -> Option<String> {
    phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}

pub struct TouristServiceImpl<R>
where
    R: TouristRepository,
{
    tourist_repo: Arc<R>,
    // Username and e-mail checks hold this until the account is saved.
    write_lock: Mutex<()>,
}

impl<R> TouristServiceImpl<R>
where
    R: TouristRepository,
{
    pub fn new(tourist_repo: Arc<R>) -> Self {
        Self {
            tourist_repo,
            write_lock: Mutex::new(()),
        }
    }

    fn hash(password: &str) -> Result<String, TouristError> {
        hash_password(password)
            .map_err(|e| TouristError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> Result<(), TouristError> {
        match self.tourist_repo.find_by_email(email).await? {
            Some(other) if Some(other.id) != owner => Err(TouristError::EmailTaken),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> TouristService for TouristServiceImpl<R>
where
    R: TouristRepository + 'static,
{
    async fn register(&self, form: TouristRegistrationForm) -> Result<Tourist, TouristError> {
        validate_form(&form)?;
        let password_hash = Self::hash(&form.password)?;

        let _guard = self.write_lock.lock().await;
        if self
            .tourist_repo
            .find_by_username(&form.username)
            .await?
            .is_some()
        {
            return Err(TouristError::UsernameTaken);
        }
        self.ensure_email_free(&form.email, None).await?;

        let tourist = Tourist {
            id: self.tourist_repo.next_id().await?,
            username: form.username,
            email: form.email.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            phone: clean_phone(form.phone),
            password_hash,
            active: true,
            registered_at: Utc::now(),
        };

        let saved = self.tourist_repo.save(&tourist).await?;
        tracing::info!(tourist_id = saved.id, username = %saved.username, "Tourist registered");
        Ok(saved)
    }

    async fn search(&self, query: TouristSearchQuery) -> Result<Vec<Tourist>, TouristError> {
        let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

        let tourists = self.tourist_repo.find_all().await?;
        Ok(tourists
            .into_iter()
            .filter(|t| name.map_or(true, |n| t.matches_name(n)))
            .filter(|t| query.active.map_or(true, |a| t.active == a))
            .collect())
    }

    async fn view(&self, id: i64) -> Result<Tourist, TouristError> {
        self.tourist_repo
            .find_by_id(id)
            .await?
            .ok_or(TouristError::NotFound)
    }

    async fn modify(&self, id: i64, form: TouristUpdateForm) -> Result<Tourist, TouristError> {
        validate_form(&form)?;

        let _guard = self.write_lock.lock().await;
        let mut tourist = self
            .tourist_repo
            .find_by_id(id)
            .await?
            .ok_or(TouristError::NotFound)?;

        self.ensure_email_free(&form.email, Some(id)).await?;

        tourist.email = form.email.trim().to_string();
        tourist.first_name = form.first_name.trim().to_string();
        tourist.last_name = form.last_name.trim().to_string();
        tourist.phone = clean_phone(form.phone);
        if let Some(active) = form.active {
            tourist.active = active;
        }

        let saved = self.tourist_repo.save(&tourist).await?;
        tracing::info!(tourist_id = id, "Tourist modified");
        Ok(saved)
    }

    async fn change_password(&self, id: i64, form: PasswordChangeForm) -> Result<(), TouristError> {
        validate_form(&form)?;

        let mut tourist = self
            .tourist_repo
            .find_by_id(id)
            .await?
            .ok_or(TouristError::NotFound)?;

        if !verify_password(&form.current_password, &tourist.password_hash) {
            tracing::warn!(tourist_id = id, "Password change with wrong current password");
            return Err(ValidationReport::single(
                "current_password",
                "Current password is incorrect",
            )
            .into());
        }
        if form.new_password == form.current_password {
            return Err(ValidationReport::single(
                "new_password",
                "New password must differ from the current one",
            )
            .into());
        }

        tourist.password_hash = Self::hash(&form.new_password)?;
        self.tourist_repo.save(&tourist).await?;
        tracing::info!(tourist_id = id, "Tourist password changed");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), TouristError> {
        if !self.tourist_repo.delete(id).await? {
            return Err(TouristError::NotFound);
        }
        tracing::info!(tourist_id = id, "Tourist deleted");
        Ok(())
    }
}
