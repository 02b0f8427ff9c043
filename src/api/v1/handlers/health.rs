/*
 * Responsibility
 * - GET /health (liveness check, no token required)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "token_source": state.auth.token_source().to_string(),
        })),
    )
}
