//! Address Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::AddressForm;
use crate::application::services::{observe, AddressError};
use crate::domain::Address;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<AddressError> for AppError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::NotFound => AppError::NotFound(e.to_string()),
            AddressError::Validation(report) => AppError::Validation(report),
            AddressError::HasAssociatedClasses { .. } => AppError::Conflict(e.to_string()),
            AddressError::Connection(e) => AppError::Connection(e),
        }
    }
}

pub async fn list_addresses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Address>>, AppError> {
    let addresses = observe("addresses.list", state.addresses.list_addresses().await)?;
    Ok(Json(addresses))
}

pub async fn view_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<Json<Address>, AppError> {
    let id = parse_id(&address_id, "address")?;
    let address = observe("addresses.view", state.addresses.view_address(id).await)?;
    Ok(Json(address))
}

pub async fn insert_address(
    State(state): State<AppState>,
    Json(body): Json<AddressForm>,
) -> Result<(StatusCode, Json<Address>), AppError> {
    let address = observe("addresses.insert", state.addresses.insert_address(body).await)?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Delete an address; refused while classes are associated with it
pub async fn delete_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&address_id, "address")?;
    observe("addresses.delete", state.addresses.delete_address(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
