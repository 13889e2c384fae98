//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::LoginForm;
use crate::application::services::{observe, AuthError, LoginResult};
use crate::presentation::http::extractors::BearerToken;
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(report) => AppError::Validation(report),
            AuthError::Connection(e) => AppError::Connection(e),
            AuthError::AccountLocked | AuthError::AccountDisabled => {
                AppError::Forbidden(e.to_string())
            }
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::SessionNotFound => AppError::Unauthorized(e.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginForm>,
) -> Result<Json<LoginResult>, AppError> {
    let result = observe("auth.login", state.auth.login(body).await)?;
    Ok(Json(result))
}

/// Revoke the presented access token
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    observe("auth.logout", state.auth.logout(&token).await)?;
    Ok(StatusCode::NO_CONTENT)
}
