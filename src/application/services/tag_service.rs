//! Tag Service
//!
//! Search tags the agency offers to tourists: list, insert, and delete a
//! selection of them at once.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::OutcomeLabel;
use crate::application::dto::{TagForm, TagSearchQuery, TagSelection};
use crate::domain::{Tag, TagRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait TagService: Send + Sync {
    async fn search(&self, query: TagSearchQuery) -> Result<Vec<Tag>, TagError>;

    async fn insert(&self, form: TagForm) -> Result<Tag, TagError>;

    /// Delete every selected tag, or none of them
    async fn delete_selected(&self, selection: TagSelection) -> Result<Vec<Tag>, TagError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Tag not found: {0}")]
    NotFound(i64),

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("A tag named '{0}' already exists")]
    Duplicate(String),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for TagError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Duplicate(_) => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct TagServiceImpl<R>
where
    R: TagRepository,
{
    tag_repo: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R> TagServiceImpl<R>
where
    R: TagRepository,
{
    pub fn new(tag_repo: Arc<R>) -> Self {
        Self {
            tag_repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Put back tags deleted before a failure.
    async fn restore(&self, deleted: &[Tag]) {
        for tag in deleted {
            if let Err(e) = self.tag_repo.save(tag).await {
                tracing::warn!(tag_id = tag.id, error = %e, "Could not restore tag");
            }
        }
    }
}

#[async_trait]
impl<R> TagService for TagServiceImpl<R>
where
    R: TagRepository + 'static,
{
    async fn search(&self, query: TagSearchQuery) -> Result<Vec<Tag>, TagError> {
        let keyword = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty());

        let tags = self.tag_repo.find_all().await?;
        Ok(tags
            .into_iter()
            .filter(|t| keyword.map_or(true, |k| t.mentions(k)))
            .collect())
    }

    async fn insert(&self, form: TagForm) -> Result<Tag, TagError> {
        validate_form(&form)?;
        let name = form.name.trim().to_lowercase();

        let _guard = self.write_lock.lock().await;
        if self.tag_repo.find_by_name(&name).await?.is_some() {
            return Err(TagError::Duplicate(name));
        }

        let tag = Tag {
            id: self.tag_repo.next_id().await?,
            name,
            description: form.description.trim().to_string(),
            created_at: Utc::now(),
        };
        let saved = self.tag_repo.save(&tag).await?;
        tracing::info!(tag_id = saved.id, name = %saved.name, "Tag inserted");
        Ok(saved)
    }

    async fn delete_selected(&self, selection: TagSelection) -> Result<Vec<Tag>, TagError> {
        validate_form(&selection)?;
        let mut ids = selection.ids;
        ids.sort_unstable();
        ids.dedup();

        let _guard = self.write_lock.lock().await;
        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            let tag = self.tag_repo.find_by_id(id).await?.ok_or(TagError::NotFound(id))?;
            selected.push(tag);
        }

        let mut deleted = Vec::with_capacity(selected.len());
        for tag in selected {
            if let Err(e) = self.tag_repo.delete(tag.id).await {
                self.restore(&deleted).await;
                return Err(e.into());
            }
            deleted.push(tag);
        }

        tracing::info!(count = deleted.len(), "Tags deleted");
        Ok(deleted)
    }
}
