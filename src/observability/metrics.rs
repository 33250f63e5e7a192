//! Metrics collection and exposition.
//!
//! # Metrics
//! - `coach_http_requests_total` (counter): requests by method, status, group
//! - `coach_http_request_duration_seconds` (histogram): latency by method, group
//!
//! # Design Decisions
//! - The exporter listens on its own address, never on the service router
//! - Without an installed recorder the macros are no-ops

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::GroupIndex;

/// Label used for requests outside every route group.
const NO_GROUP: &str = "none";

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, group: &'static str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("group", group.to_string()),
    ];
    metrics::counter!("coach_http_requests_total", &labels).increment(1);
    metrics::histogram!(
        "coach_http_request_duration_seconds",
        "method" => method.to_string(),
        "group" => group
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware that times every request and labels it with its route group.
pub async fn track_requests(State(index): State<GroupIndex>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let group = index.group_for(request.uri().path()).unwrap_or(NO_GROUP);

    let response = next.run(request).await;

    record_request(&method, response.status().as_u16(), group, start);
    response
}
