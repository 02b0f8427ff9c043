/*
 * Responsibility
 * - PUT /admin/token-source: switch where tokens are read from, without re-registering hooks
 * - Requires the `admin` claim on top of module-level authentication
 */
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, TokenSource};
use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_CLAIM: &str = "admin";

#[derive(Debug, Deserialize)]
pub struct TokenSourceRequest {
    pub token_source: String,
}

#[derive(Debug, Serialize)]
pub struct TokenSourceResponse {
    pub previous: String,
    pub current: String,
}

pub async fn set_token_source(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<TokenSourceRequest>,
) -> Result<Json<TokenSourceResponse>, AppError> {
    if !user.has_claim(ADMIN_CLAIM) {
        tracing::warn!(user = %user.user_name(), "token source change without admin claim");
        return Err(AppError::Forbidden);
    }

    let source = req
        .token_source
        .parse::<TokenSource>()
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let previous = state.auth.token_source();
    state.auth.set_token_source(source);
    tracing::info!(user = %user.user_name(), %previous, current = %source, "token source changed");

    Ok(Json(TokenSourceResponse {
        previous: previous.to_string(),
        current: source.to_string(),
    }))
}
