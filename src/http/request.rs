//! Request correlation.
//!
//! # Responsibilities
//! - Name the request ID header
//! - Read the ID back from a request for logging
//! - Open the per-request trace span carrying method, path and ID
//!
//! # Design Decisions
//! - IDs are UUID v4, generated by tower-http when the client sent none
//! - The ID is set before the trace span opens so every log line carries it

use axum::http::Request;
use tracing::Span;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Access to the request ID on anything that carries headers.
pub trait RequestIdExt {
    /// The request ID, or `"unknown"` before the ID layer has run.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
