//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (compare Origin against the allow-list, attach headers)
//!     → body limit (tower-http, configured in http::server)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - The allow-list is chosen once at startup and never changes
//! - CORS is browser-enforced: the server annotates, it does not reject

pub mod cors;

pub use cors::{cors_layer, OriginAllowList, DEVELOPMENT_ORIGINS};
