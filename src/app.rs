/*
 * Responsibility
 * - Load Config → build tokenizer / TokenAuthConfig → assemble Router
 * - Token authentication: application hook (opportunistic) + module hooks (required)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::auth::{self, TokenAuthConfig};
use crate::config::Config;
use crate::error::AuthError;
use crate::middleware;
use crate::pipeline::{self, Pipelines};
use crate::services::StaticTokenizer;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,token_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    let auth_config = build_auth_config(&config);
    tracing::info!(
        "starting token-auth demo in {:?} mode on {} (token source: {}, {} known tokens)",
        config.app_env,
        config.addr,
        auth_config.token_source(),
        config.auth_tokens.len()
    );

    let app = build_router(&config, auth_config)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_auth_config(config: &Config) -> Arc<TokenAuthConfig> {
    let tokenizer = Arc::new(StaticTokenizer::new(&config.auth_tokens));
    Arc::new(TokenAuthConfig::with_source(tokenizer, config.token_source))
}

/// Full demo app: routes, token hooks and transport middleware.
pub fn build_router(
    config: &Config,
    auth_config: Arc<TokenAuthConfig>,
) -> Result<Router, AuthError> {
    let state = AppState::new(Arc::clone(&auth_config));

    let mut pipelines = Pipelines::new();
    auth::enable(&mut pipelines, Arc::clone(&auth_config))?;

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(&auth_config)?)
        .with_state(state);

    let router = pipeline::apply(router, pipelines);

    Ok(middleware::http::apply(router, config))
}
