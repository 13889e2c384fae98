//! Tourist Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    PasswordChangeForm, TouristRegistrationForm, TouristResponse, TouristSearchQuery,
    TouristUpdateForm,
};
use crate::application::services::{observe, TouristError};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<TouristError> for AppError {
    fn from(e: TouristError) -> Self {
        match e {
            TouristError::NotFound => AppError::NotFound(e.to_string()),
            TouristError::Validation(report) => AppError::Validation(report),
            TouristError::UsernameTaken | TouristError::EmailTaken => {
                AppError::Conflict(e.to_string())
            }
            TouristError::Connection(e) => AppError::Connection(e),
            TouristError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Register a tourist (public)
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<TouristRegistrationForm>,
) -> Result<(StatusCode, Json<TouristResponse>), AppError> {
    let tourist = observe("tourists.register", state.tourists.register(body).await)?;
    Ok((StatusCode::CREATED, Json(TouristResponse::from(tourist))))
}

/// Search tourists by `name` and `active`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<TouristSearchQuery>,
) -> Result<Json<Vec<TouristResponse>>, AppError> {
    let tourists = observe("tourists.search", state.tourists.search(query).await)?;
    Ok(Json(tourists.into_iter().map(TouristResponse::from).collect()))
}

/// View one tourist
pub async fn view(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
) -> Result<Json<TouristResponse>, AppError> {
    let id = parse_id(&tourist_id, "tourist")?;
    let tourist = observe("tourists.view", state.tourists.view(id).await)?;
    Ok(Json(TouristResponse::from(tourist)))
}

/// Modify a tourist's account data
pub async fn modify(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
    Json(body): Json<TouristUpdateForm>,
) -> Result<Json<TouristResponse>, AppError> {
    let id = parse_id(&tourist_id, "tourist")?;
    let tourist = observe("tourists.modify", state.tourists.modify(id, body).await)?;
    Ok(Json(TouristResponse::from(tourist)))
}

/// Change a tourist's password
pub async fn change_password(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
    Json(body): Json<PasswordChangeForm>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&tourist_id, "tourist")?;
    observe(
        "tourists.change_password",
        state.tourists.change_password(id, body).await,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a tourist
pub async fn delete(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&tourist_id, "tourist")?;
    observe("tourists.delete", state.tourists.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
