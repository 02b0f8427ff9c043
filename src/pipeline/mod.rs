//! Ordered request hooks layered onto axum routers.
//!
//! - before-request hooks run in order before routing; the first one that
//!   returns a response short-circuits the rest (and the handler)
//! - after-request hooks see every response produced through the pipeline
//! - error hooks turn a [`HookError`] into a response; first `Some` wins
//!
//! [`Pipelines`] applies to a whole application, [`Module`] to one group of
//! routes.

mod layer;

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::http::request::Parts;
use axum::response::Response;

use crate::error::HookError;

pub use layer::{apply, apply_to_routes};

#[async_trait]
pub trait BeforeHook: Send + Sync {
    /// `Ok(Some(_))` ends the request with that response.
    async fn before(&self, parts: &mut Parts) -> Result<Option<Response>, HookError>;
}

#[async_trait]
pub trait AfterHook: Send + Sync {
    async fn after(&self, response: &mut Response);
}

#[async_trait]
pub trait ErrorHook: Send + Sync {
    async fn on_error(&self, parts: &Parts, error: &HookError) -> Option<Response>;
}

/// A named entry of a pipeline.
pub struct PipelineItem<H: ?Sized> {
    name: Cow<'static, str>,
    hook: Arc<H>,
}

impl<H: ?Sized> PipelineItem<H> {
    pub fn new(name: impl Into<Cow<'static, str>>, hook: Arc<H>) -> Self {
        Self {
            name: name.into(),
            hook,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<H: ?Sized> Clone for PipelineItem<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hook: Arc::clone(&self.hook),
        }
    }
}

/// Ordered list of hooks of one kind.
pub struct Pipeline<H: ?Sized> {
    items: Vec<PipelineItem<H>>,
}

impl<H: ?Sized> Default for Pipeline<H> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<H: ?Sized> Clone for Pipeline<H> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<H: ?Sized> Pipeline<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item_to_start_of_pipeline(&mut self, item: PipelineItem<H>) {
        self.items.insert(0, item);
    }

    pub fn add_item_to_end_of_pipeline(&mut self, item: PipelineItem<H>) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(PipelineItem::name).collect()
    }
}

pub type BeforePipeline = Pipeline<dyn BeforeHook>;
pub type AfterPipeline = Pipeline<dyn AfterHook>;
pub type ErrorPipeline = Pipeline<dyn ErrorHook>;

impl Pipeline<dyn BeforeHook> {
    pub async fn invoke(&self, parts: &mut Parts) -> Result<Option<Response>, HookError> {
        for item in &self.items {
            if let Some(response) = item.hook.before(parts).await? {
                tracing::debug!(hook = %item.name, "before-request hook produced a response");
                return Ok(Some(response));
            }
        }
        Ok(None)
    }
}

impl Pipeline<dyn AfterHook> {
    pub async fn invoke(&self, response: &mut Response) {
        for item in &self.items {
            item.hook.after(response).await;
        }
    }
}

impl Pipeline<dyn ErrorHook> {
    pub async fn invoke(&self, parts: &Parts, error: &HookError) -> Option<Response> {
        for item in &self.items {
            if let Some(response) = item.hook.on_error(parts, error).await {
                return Some(response);
            }
        }
        None
    }
}

/// Application-wide hook chains.
#[derive(Default, Clone)]
pub struct Pipelines {
    pub before_request: BeforePipeline,
    pub after_request: AfterPipeline,
    pub on_error: ErrorPipeline,
}

impl Pipelines {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A group of routes carrying its own hook chains.
///
/// The hooks only run for requests matching one of `routes`.
pub struct Module<S = ()> {
    routes: Router<S>,
    pub before: BeforePipeline,
    pub after: AfterPipeline,
    pub on_error: ErrorPipeline,
}

impl<S> Module<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(routes: Router<S>) -> Self {
        Self {
            routes,
            before: BeforePipeline::new(),
            after: AfterPipeline::new(),
            on_error: ErrorPipeline::new(),
        }
    }

    pub fn into_router(self) -> Router<S> {
        let pipelines = Pipelines {
            before_request: self.before,
            after_request: self.after,
            on_error: self.on_error,
        };
        apply_to_routes(self.routes, pipelines)
    }
}
