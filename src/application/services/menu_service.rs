//! Menu Service
//!
//! View, modify and delete the daily menus of refreshment points.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Weekday;

use super::OutcomeLabel;
use crate::application::dto::MenuForm;
use crate::domain::{DailyMenu, MenuRepository, RefreshmentPointRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait MenuService: Send + Sync {
    /// Menus of a point, Monday first
    async fn list_menus(&self, point_id: i64) -> Result<Vec<DailyMenu>, MenuError>;

    async fn view_menu(&self, point_id: i64, day: Weekday) -> Result<DailyMenu, MenuError>;

    /// Create or replace the menu of one day
    async fn modify_menu(&self, point_id: i64, day: Weekday, form: MenuForm) -> Result<DailyMenu, MenuError>;

    async fn delete_menu(&self, point_id: i64, day: Weekday) -> Result<(), MenuError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Refreshment point not found")]
    PointNotFound,

    #[error("No menu stored for {0}")]
    NotFound(Weekday),

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for MenuError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::PointNotFound | Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Connection(_) => "connection",
        }
    }
}

/// Parse a weekday name or three-letter abbreviation, case-insensitive.
pub fn parse_day(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}

pub struct MenuServiceImpl<P, M>
where
    P: RefreshmentPointRepository,
    M: MenuRepository,
{
    point_repo: Arc<P>,
    menu_repo: Arc<M>,
}

impl<P, M> MenuServiceImpl<P, M>
where
    P: RefreshmentPointRepository,
    M: MenuRepository,
{
    pub fn new(point_repo: Arc<P>, menu_repo: Arc<M>) -> Self {
        Self {
            point_repo,
            menu_repo,
        }
    }

    async fn ensure_point(&self, point_id: i64) -> Result<(), MenuError> {
        self.point_repo
            .find_by_id(point_id)
            .await?
            .map(|_| ())
            .ok_or(MenuError::PointNotFound)
    }
}

#[async_trait]
impl<P, M> MenuService for MenuServiceImpl<P, M>
where
    P: RefreshmentPointRepository + 'static,
    M: MenuRepository + 'static,
{
    async fn list_menus(&self, point_id: i64) -> Result<Vec<DailyMenu>, MenuError> {
        self.ensure_point(point_id).await?;
        Ok(self.menu_repo.find_by_point(point_id).await?)
    }

    async fn view_menu(&self, point_id: i64, day: Weekday) -> Result<DailyMenu, MenuError> {
        self.ensure_point(point_id).await?;
        self.menu_repo
            .find(point_id, day)
            .await?
            .ok_or(MenuError::NotFound(day))
    }

    async fn modify_menu(&self, point_id: i64, day: Weekday, form: MenuForm) -> Result<DailyMenu, MenuError> {
        validate_form(&form)?;
        self.ensure_point(point_id).await?;

        let menu = DailyMenu {
            point_id,
            day,
            dishes: form.dishes.iter().map(|d| d.trim().to_string()).collect(),
            special_notes: form.special_notes.trim().to_string(),
        };

        let saved = self.menu_repo.save(&menu).await?;
        tracing::info!(point_id, %day, dishes = saved.dishes.len(), "Menu saved");
        Ok(saved)
    }

    async fn delete_menu(&self, point_id: i64, day: Weekday) -> Result<(), MenuError> {
        self.ensure_point(point_id).await?;
        if !self.menu_repo.delete(point_id, day).await? {
            return Err(MenuError::NotFound(day));
        }
        tracing::info!(point_id, %day, "Menu deleted");
        Ok(())
    }
}
