//! Simulation Handlers
//!
//! Read and flip the connection flag of a simulated server link.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{ConnectionToggleRequest, ServerStatusResponse};
use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn link<'a>(state: &'a AppState, server: &str) -> Result<&'a ServerLink, AppError> {
    state
        .links
        .get(server)
        .ok_or_else(|| AppError::NotFound(format!("Unknown server: {}", server)))
}

pub async fn server_status(
    State(state): State<AppState>,
    Path(server): Path<String>,
) -> Result<Json<ServerStatusResponse>, AppError> {
    let link = link(&state, &server)?;
    Ok(Json(ServerStatusResponse::from(link)))
}

pub async fn set_connection(
    State(state): State<AppState>,
    Path(server): Path<String>,
    Json(body): Json<ConnectionToggleRequest>,
) -> Result<Json<ServerStatusResponse>, AppError> {
    let link = link(&state, &server)?;
    link.set_connected(body.connected);
    Ok(Json(ServerStatusResponse::from(link)))
}
