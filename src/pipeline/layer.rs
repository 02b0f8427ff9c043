//! Runs [`Pipelines`] as an axum middleware.
//!
//! Example:
//! ```ignore
//! let mut pipelines = Pipelines::new();
//! token_auth::auth::enable(&mut pipelines, Arc::clone(&config))?;
//! let app = pipeline::apply(routes, pipelines);
//! ```

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::pipeline::Pipelines;

/// Runs the hooks for every request reaching `router`, matched or not.
pub fn apply<S>(router: Router<S>, pipelines: Pipelines) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        Arc::new(pipelines),
        run_pipelines,
    ))
}

/// Runs the hooks only for requests matching one of the routes of `router`.
pub fn apply_to_routes<S>(router: Router<S>, pipelines: Pipelines) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        Arc::new(pipelines),
        run_pipelines,
    ))
}

async fn run_pipelines(
    State(pipelines): State<Arc<Pipelines>>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let mut response = match pipelines.before_request.invoke(&mut parts).await {
        Ok(Some(response)) => response,
        Ok(None) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => match pipelines.on_error.invoke(&parts, &err).await {
            Some(response) => response,
            None => {
                tracing::error!(error = %err, path = %parts.uri.path(), "before-request hook failed");
                AppError::Internal.into_response()
            }
        },
    };

    pipelines.after_request.invoke(&mut response).await;

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::LogCapture;
    use crate::error::HookError;
    use crate::pipeline::{AfterHook, BeforeHook, ErrorHook, PipelineItem};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::request::Parts;
    use axum::http::{HeaderValue, StatusCode};
    use axum::routing;
    use tower::ServiceExt;

    struct Reject;

    #[async_trait]
    impl BeforeHook for Reject {
        async fn before(&self, _parts: &mut Parts) -> Result<Option<Response>, HookError> {
            Ok(Some(StatusCode::FORBIDDEN.into_response()))
        }
    }

    struct Fail;

    #[async_trait]
    impl BeforeHook for Fail {
        async fn before(&self, _parts: &mut Parts) -> Result<Option<Response>, HookError> {
            Err(HookError::Tokenizer("token store unavailable".into()))
        }
    }

    struct ServiceUnavailable;

    #[async_trait]
    impl ErrorHook for ServiceUnavailable {
        async fn on_error(&self, _parts: &Parts, _error: &HookError) -> Option<Response> {
            Some(StatusCode::SERVICE_UNAVAILABLE.into_response())
        }
    }

    struct Stamp;

    #[async_trait]
    impl AfterHook for Stamp {
        async fn after(&self, response: &mut Response) {
            response
                .headers_mut()
                .insert("x-pipeline", HeaderValue::from_static("done"));
        }
    }

    fn routes() -> Router {
        Router::new().route("/", routing::get(|| async { "ok" }))
    }

    fn get(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_pipelines_pass_through() {
        let app = apply(routes(), Pipelines::new());
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_before_response_skips_handler_but_runs_after_hooks() {
        let mut pipelines = Pipelines::new();
        let reject: Arc<dyn BeforeHook> = Arc::new(Reject);
        let stamp: Arc<dyn AfterHook> = Arc::new(Stamp);
        pipelines
            .before_request
            .add_item_to_end_of_pipeline(PipelineItem::new("reject", reject));
        pipelines
            .after_request
            .add_item_to_end_of_pipeline(PipelineItem::new("stamp", stamp));

        let response = apply(routes(), pipelines).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.headers()["x-pipeline"], "done");
    }

    #[tokio::test]
    async fn test_hook_error_without_error_hooks_is_internal() {
        let mut pipelines = Pipelines::new();
        let fail: Arc<dyn BeforeHook> = Arc::new(Fail);
        pipelines
            .before_request
            .add_item_to_end_of_pipeline(PipelineItem::new("fail", fail));

        let response = apply(routes(), pipelines).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_hook_handles_hook_error() {
        let mut pipelines = Pipelines::new();
        let fail: Arc<dyn BeforeHook> = Arc::new(Fail);
        let handler: Arc<dyn ErrorHook> = Arc::new(ServiceUnavailable);
        pipelines
            .before_request
            .add_item_to_end_of_pipeline(PipelineItem::new("fail", fail));
        pipelines
            .on_error
            .add_item_to_end_of_pipeline(PipelineItem::new("unavailable", handler));

        let response = apply(routes(), pipelines).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_route_scoped_hooks_skip_unmatched_paths() {
        let mut pipelines = Pipelines::new();
        let reject: Arc<dyn BeforeHook> = Arc::new(Reject);
        pipelines
            .before_request
            .add_item_to_end_of_pipeline(PipelineItem::new("reject", reject));

        let app = apply_to_routes(routes(), pipelines);
        let response = app.clone().oneshot(get("/missing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_hook_error_log_omits_query_credential() {
        let (logs, _guard) = LogCapture::install();
        let mut pipelines = Pipelines::new();
        let fail: Arc<dyn BeforeHook> = Arc::new(Fail);
        pipelines
            .before_request
            .add_item_to_end_of_pipeline(PipelineItem::new("fail", fail));

        let response = apply(routes(), pipelines)
            .oneshot(get("/?authorization=Token+SECRET-CREDENTIAL"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let output = logs.output();
        assert!(output.contains("before-request hook failed"), "logs: {output}");
        assert!(!output.contains("SECRET-CREDENTIAL"), "logs: {output}");
    }
}

