//! Role Management Handlers
//!
//! Only administrators may read or change the roles of an account.

use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::application::dto::{AccountRolesResponse, RoleAssignmentRequest};
use crate::application::services::{observe, Claims, RoleError};
use crate::domain::Role;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<RoleError> for AppError {
    fn from(e: RoleError) -> Self {
        match e {
            RoleError::AccountNotFound => AppError::NotFound(e.to_string()),
            RoleError::Validation(report) => AppError::Validation(report),
            RoleError::AlreadyAssigned(_) | RoleError::NotAssigned(_) => {
                AppError::Conflict(e.to_string())
            }
            RoleError::Connection(e) => AppError::Connection(e),
        }
    }
}

fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.has_role(Role::Administrator) {
        Ok(())
    } else {
        tracing::warn!(username = %claims.sub, "Role management refused");
        Err(AppError::Forbidden(
            "Administrator role required to manage roles".into(),
        ))
    }
}

pub async fn list_roles(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(username): Path<String>,
) -> Result<Json<AccountRolesResponse>, AppError> {
    require_admin(&claims)?;
    let roles = observe("roles.list", state.roles.list_roles(&username).await)?;
    Ok(Json(AccountRolesResponse { username, roles }))
}

pub async fn assign_role(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(username): Path<String>,
    Json(body): Json<RoleAssignmentRequest>,
) -> Result<Json<AccountRolesResponse>, AppError> {
    require_admin(&claims)?;
    let roles = observe(
        "roles.assign",
        state.roles.assign_role(&username, &body.role).await,
    )?;
    Ok(Json(AccountRolesResponse { username, roles }))
}

pub async fn remove_role(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((username, role)): Path<(String, String)>,
) -> Result<Json<AccountRolesResponse>, AppError> {
    require_admin(&claims)?;
    let roles = observe(
        "roles.remove",
        state.roles.remove_role(&username, &role).await,
    )?;
    Ok(Json(AccountRolesResponse { username, roles }))
}
