//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router from the startup [`Boundary`]
//! - Wire up middleware (request ID, tracing, metrics, CORS, timeout, body limit)
//! - Serve on a listener until the shutdown broadcast fires

use std::time::Duration;

use axum::{body::Body, extract::DefaultBodyLimit, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::make_request_span;
use crate::http::response::not_found;
use crate::lifecycle::Boundary;
use crate::observability::metrics::track_requests;
use crate::security::cors_layer;

/// HTTP server for the boundary service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server from the configuration and the startup boundary.
    pub fn new(config: ServiceConfig, boundary: Boundary) -> Self {
        let router = Self::build_router(&config, boundary);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request ID is assigned first, then the
    /// trace span opens, then metrics, then CORS, then timeout and body limit.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, boundary: Boundary) -> Router {
        let (allow_list, routes) = boundary.into_parts();
        let index = routes.index();
        let cors = cors_layer(&allow_list, &config.cors);

        routes
            .into_router()
            .fallback(not_found)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors)
            .layer(middleware::from_fn_with_state(index, track_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A handle to the fully layered router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
