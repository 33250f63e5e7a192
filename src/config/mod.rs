//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (optional, dotenvy)
//!     → environment.rs (PRODUCTION flag → DeploymentMode, read once)
//!
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to startup and the HTTP server by value
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validation;

pub use environment::{DeploymentMode, FlagDecision};
pub use loader::{resolve_config, ConfigError};
pub use schema::{CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig};
