//! Cross-origin request policy.
//!
//! # Responsibilities
//! - Hold the origin allow-list selected at startup
//! - Build the `CorsLayer` applied to every route
//! - Answer "is this origin allowed" for logging and tests
//!
//! # Design Decisions
//! - Exact string match against the `Origin` header, no wildcards or subdomains
//! - Credentials are allowed, so methods and headers are mirrored from the
//!   preflight request instead of answered with `*`
//! - Disallowed origins are not rejected; their responses simply carry no
//!   permissive headers and the browser blocks script access

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowCredentials, AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::schema::{CorsConfig, PLACEHOLDER_PRODUCTION_ORIGIN};
use crate::config::DeploymentMode;

/// Origins allowed while developing against the local frontend.
pub const DEVELOPMENT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// An ordered, immutable list of allowed origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginAllowList {
    origins: Arc<[String]>,
}

impl OriginAllowList {
    /// The fixed development list.
    pub fn development() -> Self {
        Self::from_origins(DEVELOPMENT_ORIGINS.iter().map(|o| o.to_string()))
    }

    /// The production list as supplied by deployment configuration.
    pub fn production(config: &CorsConfig) -> Self {
        Self::from_origins(config.production_origins.iter().cloned())
    }

    /// Pick the variant for `mode`.
    pub fn select(mode: DeploymentMode, config: &CorsConfig) -> Self {
        match mode {
            DeploymentMode::Production => Self::production(config),
            DeploymentMode::Development => Self::development(),
        }
    }

    fn from_origins(origins: impl IntoIterator<Item = String>) -> Self {
        Self {
            origins: origins.into_iter().collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Exact, case-sensitive match.
    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    /// True while the deployment still carries the placeholder origin.
    pub fn has_placeholder(&self) -> bool {
        self.allows(PLACEHOLDER_PRODUCTION_ORIGIN)
    }

    fn header_values(&self) -> Vec<HeaderValue> {
        self.origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Origin is not a valid header value, skipping");
                    None
                }
            })
            .collect()
    }
}

/// Build the CORS layer for `allow_list`.
pub fn cors_layer(allow_list: &OriginAllowList, config: &CorsConfig) -> CorsLayer {
    let allowed = Arc::new(allow_list.header_values());
    let credentials_for = Arc::clone(&allowed);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.iter().cloned()))
        .allow_credentials(AllowCredentials::predicate(move |origin, _parts| {
            credentials_for.contains(origin)
        }))
        // Mirrored methods/headers and max-age are sent on every preflight,
        // including ones from origins outside the list. Without
        // Access-Control-Allow-Origin the browser still fails the preflight.
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(config.max_age_secs))
}
