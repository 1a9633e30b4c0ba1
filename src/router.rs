//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/health`
//! - POST: `/webhook/:token`

use crate::{binding::Bindings, chat::WebhookClient, newrelic::router::newrelic_router};
use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

/// Dependencies shared by routes across requests. None of it is mutated after
/// startup.
#[derive(Clone)]
pub struct Deps {
    pub bindings: Arc<Bindings>,
    pub webhook_client: WebhookClient,
    pub max_body_bytes: usize,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/webhook", newrelic_router())
        .layer(DefaultBodyLimit::max(deps.max_body_bytes))
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/health", get(|| async { StatusCode::OK }))
        .with_state(deps)
}

#[cfg(test)]
mod tests_general {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn router() -> Router {
        super::new(Deps {
            bindings: Arc::new(Bindings::default()),
            webhook_client: WebhookClient::new(None).unwrap(),
            max_body_bytes: 1024,
        })
    }

    #[tokio::test]
    async fn test_not_found() {
        let req = Request::builder()
            .uri("/bad/route")
            .body(Body::empty())
            .unwrap();

        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }
}
