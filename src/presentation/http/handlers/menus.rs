//! Daily Menu Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Weekday;

use crate::application::dto::MenuForm;
use crate::application::services::{observe, parse_day, MenuError};
use crate::domain::DailyMenu;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::PointNotFound | MenuError::NotFound(_) => AppError::NotFound(e.to_string()),
            MenuError::Validation(report) => AppError::Validation(report),
            MenuError::Connection(e) => AppError::Connection(e),
        }
    }
}

fn point_and_day(point_id: &str, day: &str) -> Result<(i64, Weekday), AppError> {
    let point_id = parse_id(point_id, "refreshment point")?;
    let day = parse_day(day)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown day of the week: {}", day)))?;
    Ok((point_id, day))
}

/// List the menus of a point, Monday first
pub async fn list_menus(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
) -> Result<Json<Vec<DailyMenu>>, AppError> {
    let point_id = parse_id(&point_id, "refreshment point")?;
    let menus = observe("menus.list", state.menus.list_menus(point_id).await)?;
    Ok(Json(menus))
}

/// View the menu of one day
pub async fn view_menu(
    State(state): State<AppState>,
    Path((point_id, day)): Path<(String, String)>,
) -> Result<Json<DailyMenu>, AppError> {
    let (point_id, day) = point_and_day(&point_id, &day)?;
    let menu = observe("menus.view", state.menus.view_menu(point_id, day).await)?;
    Ok(Json(menu))
}

/// Create or replace the menu of one day
pub async fn modify_menu(
    State(state): State<AppState>,
    Path((point_id, day)): Path<(String, String)>,
    Json(body): Json<MenuForm>,
) -> Result<Json<DailyMenu>, AppError> {
    let (point_id, day) = point_and_day(&point_id, &day)?;
    let menu = observe(
        "menus.modify",
        state.menus.modify_menu(point_id, day, body).await,
    )?;
    Ok(Json(menu))
}

/// Delete the menu of one day
pub async fn delete_menu(
    State(state): State<AppState>,
    Path((point_id, day)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let (point_id, day) = point_and_day(&point_id, &day)?;
    observe("menus.delete", state.menus.delete_menu(point_id, day).await)?;
    Ok(StatusCode::NO_CONTENT)
}
