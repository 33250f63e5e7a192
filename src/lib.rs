//! HTTP boundary of the singing coach backend.
//!
//! At startup the service reads the `PRODUCTION` flag, selects the matching
//! origin allow-list, attaches a credentialed CORS policy to every route and
//! mounts the song and user route groups under `/songs` and `/user`.

pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::{DeploymentMode, ServiceConfig};
pub use http::HttpServer;
pub use lifecycle::{Boundary, Shutdown, StartupError};
pub use routing::RouteGroups;
