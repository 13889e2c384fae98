//! Refreshment Point Service
//!
//! Search, view and modify the card of a refreshment point. Points are
//! registered through their convention with the agency, so there is no
//! insert or delete here; the banner limit stays as agreed.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::OutcomeLabel;
use crate::application::dto::{PointSearchQuery, RefreshmentPointForm};
use crate::domain::{PointStatus, RefreshmentPoint, RefreshmentPointRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait RefreshmentPointService: Send + Sync {
    /// Points matching every given criterion; no criteria lists them all
    async fn search(&self, query: PointSearchQuery) -> Result<Vec<RefreshmentPoint>, PointError>;

    async fn view(&self, id: i64) -> Result<RefreshmentPoint, PointError>;

    async fn modify(&self, id: i64, form: RefreshmentPointForm) -> Result<RefreshmentPoint, PointError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PointError {
    #[error("Refreshment point not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("A refreshment point named '{name}' already exists in {city}")]
    Duplicate { name: String, city: String },

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for PointError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::Duplicate { .. } => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub struct RefreshmentPointServiceImpl<P>
where
    P: RefreshmentPointRepository,
{
    point_repo: Arc<P>,
    write_lock: Mutex<()>,
}

impl<P> RefreshmentPointServiceImpl<P>
where
    P: RefreshmentPointRepository,
{
    pub fn new(point_repo: Arc<P>) -> Self {
        Self {
            point_repo,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<P> RefreshmentPointService for RefreshmentPointServiceImpl<P>
where
    P: RefreshmentPointRepository + 'static,
{
    async fn search(&self, query: PointSearchQuery) -> Result<Vec<RefreshmentPoint>, PointError> {
        let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let city = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty());

        let points = self.point_repo.find_all().await?;
        Ok(points
            .into_iter()
            .filter(|p| name.map_or(true, |n| p.matches_name(n)))
            .filter(|p| city.map_or(true, |c| p.is_in(c)))
            .collect())
    }

    async fn view(&self, id: i64) -> Result<RefreshmentPoint, PointError> {
        self.point_repo
            .find_by_id(id)
            .await?
            .ok_or(PointError::NotFound)
    }

    async fn modify(&self, id: i64, form: RefreshmentPointForm) -> Result<RefreshmentPoint, PointError> {
        validate_form(&form)?;

        let _guard = self.write_lock.lock().await;
        let mut point = self.view(id).await?;

        let name = form.name.trim().to_string();
        let city = form.city.trim().to_string();
        let clash = self.point_repo.find_all().await?.into_iter().any(|other| {
            other.id != id && other.is_in(&city) && other.name.eq_ignore_ascii_case(&name)
        });
        if clash {
            return Err(PointError::Duplicate { name, city });
        }

        point.name = name;
        point.city = city;
        point.address = form.address.trim().to_string();
        point.status = PointStatus::parse(&form.status).unwrap_or_default();
        point.capacity = form.capacity;
        point.opening_hours = trimmed(form.opening_hours);

        let saved = self.point_repo.save(&point).await?;
        tracing::info!(point_id = id, status = %saved.status, "Refreshment point modified");
        Ok(saved)
    }
}
