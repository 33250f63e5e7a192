//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn the deployment mode into an origin allow-list
//! - Register the song and user route groups
//! - Produce the immutable [`Boundary`] the HTTP server is built from
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Single linear pass, no retries
//! - The mode is injected, so tests never touch the process environment

use thiserror::Error;

use crate::config::{ConfigError, DeploymentMode, ServiceConfig};
use crate::routing::{RouteError, RouteGroups, RouteTable};
use crate::security::OriginAllowList;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route registration failed: {0}")]
    Routes(#[from] RouteError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Everything decided at startup: mode, allow-list and mounted groups.
#[derive(Debug)]
pub struct Boundary {
    mode: DeploymentMode,
    allow_list: OriginAllowList,
    routes: RouteTable,
}

impl Boundary {
    /// Select the allow-list for `mode` and register `groups`.
    pub fn configure(
        mode: DeploymentMode,
        config: &ServiceConfig,
        groups: RouteGroups,
    ) -> Result<Self, StartupError> {
        let allow_list = OriginAllowList::select(mode, &config.cors);

        tracing::info!(
            mode = %mode,
            origins = ?allow_list.as_slice(),
            "Origin allow-list selected"
        );

        let routes = RouteTable::from_groups(groups)?;
        for (prefix, tag) in routes.entries() {
            tracing::info!(prefix, tag, "Route group mounted");
        }

        let boundary = Self {
            mode,
            allow_list,
            routes,
        };

        if boundary.uses_placeholder_origin() {
            tracing::warn!(
                "Production allow-list still contains the placeholder origin; \
                 set cors.production_origins or PRODUCTION_ORIGINS"
            );
        }

        Ok(boundary)
    }

    /// Production mode is serving the placeholder origin nobody deploys to.
    pub fn uses_placeholder_origin(&self) -> bool {
        self.mode.is_production() && self.allow_list.has_placeholder()
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    pub fn allow_list(&self) -> &OriginAllowList {
        &self.allow_list
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub(crate) fn into_parts(self) -> (OriginAllowList, RouteTable) {
        (self.allow_list, self.routes)
    }
}
