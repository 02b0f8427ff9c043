/*
 * Responsibility
 * - Token hook: locate token -> tokenizer -> CurrentUser in request extensions
 * - Requires-authentication hook: 401 when no authenticated CurrentUser is present
 * - Registration into application pipelines (head of chain) and modules (token + requirement)
 */
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::auth::config::TokenAuthConfig;
use crate::auth::extract::locate_token;
use crate::auth::identity::CurrentUser;
use crate::error::{AppError, AuthError, HookError};
use crate::pipeline::{BeforeHook, Module, PipelineItem, Pipelines};

pub const TOKEN_AUTHENTICATION_HOOK: &str = "token-authentication";
pub const REQUIRES_AUTHENTICATION_HOOK: &str = "requires-authentication";

/// Resolves the request token and stores the identity, never responds.
pub struct TokenAuthHook {
    config: Arc<TokenAuthConfig>,
}

impl TokenAuthHook {
    pub fn new(config: Arc<TokenAuthConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BeforeHook for TokenAuthHook {
    async fn before(&self, parts: &mut Parts) -> Result<Option<Response>, HookError> {
        let source = self.config.token_source();

        let Some(token) = locate_token(parts, source) else {
            tracing::debug!(source = %source, "no applicable token on request");
            return Ok(None);
        };

        let resolved = self
            .config
            .tokenizer()
            .resolve(&token, parts)
            .await
            .map_err(HookError::Tokenizer)?;

        match resolved {
            Some(identity) => {
                parts.extensions.insert(CurrentUser::new(identity));
            }
            None => tracing::debug!(source = %source, "token not recognized by tokenizer"),
        }

        Ok(None)
    }
}

/// Short-circuits with 401 unless an authenticated [`CurrentUser`] is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequiresAuthentication;

#[async_trait]
impl BeforeHook for RequiresAuthentication {
    async fn before(&self, parts: &mut Parts) -> Result<Option<Response>, HookError> {
        match CurrentUser::from_parts(parts) {
            Some(user) if user.is_authenticated() => Ok(None),
            _ => {
                tracing::debug!(path = %parts.uri.path(), "rejecting unauthenticated request");
                Ok(Some(AppError::Unauthorized.into_response()))
            }
        }
    }
}

fn token_item(config: Arc<TokenAuthConfig>) -> PipelineItem<dyn BeforeHook> {
    let hook: Arc<dyn BeforeHook> = Arc::new(TokenAuthHook::new(config));
    PipelineItem::new(TOKEN_AUTHENTICATION_HOOK, hook)
}

/// Enables token authentication for the whole application.
///
/// The token hook goes to the start of the before-request chain so that any
/// later hook checking for a caller sees the identity it may have set.
pub fn enable(
    pipelines: &mut Pipelines,
    config: impl Into<Option<Arc<TokenAuthConfig>>>,
) -> Result<(), AuthError> {
    let config = config
        .into()
        .ok_or(AuthError::invalid_argument("config"))?;

    pipelines
        .before_request
        .add_item_to_start_of_pipeline(token_item(config));

    Ok(())
}

/// Enables token authentication for one module and requires it for all of
/// the module's routes.
pub fn enable_for_module<S>(
    module: &mut Module<S>,
    config: impl Into<Option<Arc<TokenAuthConfig>>>,
) -> Result<(), AuthError>
where
    S: Clone + Send + Sync + 'static,
{
    let config = config
        .into()
        .ok_or(AuthError::invalid_argument("config"))?;

    let requires: Arc<dyn BeforeHook> = Arc::new(RequiresAuthentication);
    module.before.add_item_to_end_of_pipeline(token_item(config));
    module
        .before
        .add_item_to_end_of_pipeline(PipelineItem::new(REQUIRES_AUTHENTICATION_HOOK, requires));

    Ok(())
}
