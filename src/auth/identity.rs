/*
 * Responsibility
 * - The identity a tokenizer resolves (UserIdentity) and the request slot holding it (CurrentUser)
 * - The token hook inserts CurrentUser into request extensions; handlers only see this type
 *
 * Notes
 * - Token decoding lives in Tokenizer implementations, not here
 */
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::error::AppError;

/// Who the caller is, as resolved by a [`crate::auth::Tokenizer`].
pub trait UserIdentity: Send + Sync + fmt::Debug {
    fn user_name(&self) -> &str;

    fn claims(&self) -> &[String] {
        &[]
    }
}

/// The request's current identity.
///
/// Cloning shares the underlying identity; the `Arc` handed out by the
/// tokenizer is the one handlers receive.
#[derive(Clone, Debug)]
pub struct CurrentUser(Arc<dyn UserIdentity>);

impl CurrentUser {
    pub fn new(identity: Arc<dyn UserIdentity>) -> Self {
        Self(identity)
    }

    pub fn identity(&self) -> &Arc<dyn UserIdentity> {
        &self.0
    }

    pub fn user_name(&self) -> &str {
        self.0.user_name()
    }

    pub fn claims(&self) -> &[String] {
        self.0.claims()
    }

    /// A blank user name does not count as authenticated.
    pub fn is_authenticated(&self) -> bool {
        !self.0.user_name().trim().is_empty()
    }

    pub fn has_claim(&self, claim: &str) -> bool {
        self.0.claims().iter().any(|c| c == claim)
    }

    /// Reads the identity slot of a request.
    pub fn from_parts(parts: &Parts) -> Option<&CurrentUser> {
        parts.extensions.get::<CurrentUser>()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        CurrentUser::from_parts(parts)
            .filter(|user| user.is_authenticated())
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(CurrentUser::from_parts(parts)
            .filter(|user| user.is_authenticated())
            .cloned())
    }
}
