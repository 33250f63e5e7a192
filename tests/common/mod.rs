//! Shared utilities for integration tests.

use axum::{
    routing::{get, post},
    Json, Router,
};
use idol_coach_api::{Boundary, DeploymentMode, HttpServer, RouteGroups, ServiceConfig};
use serde_json::json;

pub const DEV_ORIGIN: &str = "http://localhost:3000";
pub const PROD_ORIGIN: &str = "https://coach.example.com";

/// Stand-ins for the song and user modules.
pub fn stub_groups() -> RouteGroups {
    RouteGroups {
        songs: Router::new()
            .route("/list", get(|| async { Json(json!({ "songs": [] })) }))
            .route("/prepare", post(|| async { Json(json!({ "message": "prepared" })) })),
        user: Router::new()
            .route("/analyze_text", post(|| async { Json(json!({ "message": "ok" })) })),
    }
}

/// Configuration with a real production origin instead of the placeholder.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.cors.production_origins = vec![PROD_ORIGIN.to_string()];
    config
}

/// Build a server as if `PRODUCTION` held `flag`.
pub fn server_for_flag(flag: Option<&str>) -> HttpServer {
    let config = test_config();
    let boundary = Boundary::configure(DeploymentMode::from_flag(flag), &config, stub_groups())
        .expect("boundary should configure");
    HttpServer::new(config, boundary)
}

/// The fully layered router for `flag`.
#[allow(dead_code)]
pub fn app_for_flag(flag: Option<&str>) -> Router {
    server_for_flag(flag).router()
}
