//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route groups (supplied by the song and user modules)
//!     → router.rs (register under fixed prefixes)
//!     → matcher.rs (validate prefixes, reject overlaps)
//!     → Freeze as immutable RouteTable
//!     → Nest into a single axum Router
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Prefix matching only, on path segment boundaries
//! - Exactly two mounts: `/songs` and `/user`

pub mod matcher;
pub mod router;

pub use matcher::{PathPrefix, RouteError};
pub use router::{GroupIndex, RouteGroup, RouteGroups, RouteTable, SONGS_PREFIX, USER_PREFIX};
