//! Responses produced by the boundary itself.
//!
//! # Responsibilities
//! - Answer paths no route group owns
//!
//! # Design Decisions
//! - Error bodies use the `{"detail": ...}` shape the route groups also use
//! - The fallback sits inside the CORS layer, so 404s carry the CORS decision too

use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::request::RequestIdExt;

/// JSON error body with a single `detail` field.
pub fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Fallback for unmatched paths.
pub async fn not_found(request: Request) -> Response {
    tracing::debug!(
        request_id = %request.request_id(),
        path = %request.uri().path(),
        "No route group matched"
    );
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
