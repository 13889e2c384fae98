//! Authentication Middleware
//!
//! Protected routes need a valid, unrevoked bearer token. Its [`Claims`] go
//! into the request extensions for handlers that check roles.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::presentation::http::extractors::BearerToken;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Token checks never touch a repository, so they keep working while a
    // simulated server is down.
    let claims = state.auth.validate_token(&token).await?;
    tracing::debug!(username = %claims.sub, roles = ?claims.roles, "Request authenticated");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
