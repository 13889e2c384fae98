//! Cultural Heritage Service
//!
//! Insert, search, view, modify and delete cultural sites.

use std::sync::Arc;

use async_trait::async_trait;

use super::OutcomeLabel;
use crate::application::dto::{CulturalHeritageForm, HeritageSearchQuery};
use crate::domain::{CulturalHeritage, CulturalHeritageRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait CulturalHeritageService: Send + Sync {
    /// Sites matching every given criterion; no criteria lists them all
    async fn search(&self, query: HeritageSearchQuery) -> Result<Vec<CulturalHeritage>, HeritageError>;

    async fn view(&self, id: i64) -> Result<CulturalHeritage, HeritageError>;

    async fn insert(&self, form: CulturalHeritageForm) -> Result<CulturalHeritage, HeritageError>;

    async fn modify(&self, id: i64, form: CulturalHeritageForm) -> Result<CulturalHeritage, HeritageError>;

    async fn delete(&self, id: i64) -> Result<(), HeritageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HeritageError {
    #[error("Cultural heritage not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("A cultural heritage named '{name}' already exists in {city}")]
    Duplicate { name: String, city: String },

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for HeritageError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::Duplicate { .. } => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

fn site_from_form(id: i64, form: CulturalHeritageForm) -> CulturalHeritage {
    CulturalHeritage {
        id,
        name: form.name.trim().to_string(),
        city: form.city.trim().to_string(),
        kind: form.kind.trim().to_string(),
        description: form.description.trim().to_string(),
        opening_hours: form
            .opening_hours
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty()),
    }
}

pub struct CulturalHeritageServiceImpl<R>
where
    R: CulturalHeritageRepository,
{
    site_repo: Arc<R>,
}

impl<R> CulturalHeritageServiceImpl<R>
where
    R: CulturalHeritageRepository,
{
    pub fn new(site_repo: Arc<R>) -> Self {
        Self { site_repo }
    }

    /// Refuse a name already used by another site of the same city.
    async fn ensure_unique(&self, site: &CulturalHeritage) -> Result<(), HeritageError> {
        let clash = self.site_repo.find_all().await?.into_iter().any(|other| {
            other.id != site.id && other.is_in(&site.city) && other.name.eq_ignore_ascii_case(&site.name)
        });
        if clash {
            return Err(HeritageError::Duplicate {
                name: site.name.clone(),
                city: site.city.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R> CulturalHeritageService for CulturalHeritageServiceImpl<R>
where
    R: CulturalHeritageRepository + 'static,
{
    async fn search(&self, query: HeritageSearchQuery) -> Result<Vec<CulturalHeritage>, HeritageError> {
        let keyword = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty());
        let city = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty());

        let sites = self.site_repo.find_all().await?;
        Ok(sites
            .into_iter()
            .filter(|s| keyword.map_or(true, |k| s.mentions(k)))
            .filter(|s| city.map_or(true, |c| s.is_in(c)))
            .collect())
    }

    async fn view(&self, id: i64) -> Result<CulturalHeritage, HeritageError> {
        self.site_repo
            .find_by_id(id)
            .await?
            .ok_or(HeritageError::NotFound)
    }

    async fn insert(&self, form: CulturalHeritageForm) -> Result<CulturalHeritage, HeritageError> {
        validate_form(&form)?;

        let mut site = site_from_form(0, form);
        self.ensure_unique(&site).await?;
        site.id = self.site_repo.next_id().await?;

        let saved = self.site_repo.save(&site).await?;
        tracing::info!(site_id = saved.id, name = %saved.name, "Cultural heritage inserted");
        Ok(saved)
    }

    async fn modify(&self, id: i64, form: CulturalHeritageForm) -> Result<CulturalHeritage, HeritageError> {
        validate_form(&form)?;

        self.site_repo
            .find_by_id(id)
            .await?
            .ok_or(HeritageError::NotFound)?;

        let site = site_from_form(id, form);
        self.ensure_unique(&site).await?;

        let saved = self.site_repo.save(&site).await?;
        tracing::info!(site_id = id, "Cultural heritage modified");
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), HeritageError> {
        if !self.site_repo.delete(id).await? {
            return Err(HeritageError::NotFound);
        }
        tracing::info!(site_id = id, "Cultural heritage deleted");
        Ok(())
    }
}
