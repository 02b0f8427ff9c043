/*
 * Responsibility
 * - Define the v1 URL layout
 * - /whoami is public (identity attached opportunistically by the application hook)
 * - /account, /admin are modules that require token authentication
 */
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};

use crate::api::v1::handlers::{
    account::{profile, whoami},
    admin::set_token_source,
};
use crate::auth::{self, TokenAuthConfig};
use crate::error::AuthError;
use crate::pipeline::Module;
use crate::state::AppState;

pub fn routes(config: &Arc<TokenAuthConfig>) -> Result<Router<AppState>, AuthError> {
    let mut account = Module::new(Router::new().route("/profile", get(profile)));
    auth::enable_for_module(&mut account, Arc::clone(config))?;

    let mut admin = Module::new(Router::new().route("/token-source", put(set_token_source)));
    auth::enable_for_module(&mut admin, Arc::clone(config))?;

    Ok(Router::new()
        .route("/whoami", get(whoami))
        .nest("/account", account.into_router())
        .nest("/admin", admin.into_router()))
}
