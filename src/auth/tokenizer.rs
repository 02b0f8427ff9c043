use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use tower::BoxError;

use crate::auth::identity::UserIdentity;

/// Resolves a raw token into an identity.
///
/// - `Ok(Some(_))`: token recognized
/// - `Ok(None)`: token not recognized (normal outcome, request stays anonymous)
/// - `Err(_)`: internal fault (backend unreachable, corrupt payload, ...).
///   Propagated to the pipeline's error chain untouched.
///
/// `parts` is the in-flight request; anything the host stored in its
/// extensions (cancellation signals, tenant ids) is visible here.
#[async_trait]
pub trait Tokenizer: Send + Sync {
    async fn resolve(
        &self,
        token: &str,
        parts: &Parts,
    ) -> Result<Option<Arc<dyn UserIdentity>>, BoxError>;
}
