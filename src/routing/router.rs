//! Route group registration.
//!
//! # Responsibilities
//! - Hold the externally supplied song and user handler collections
//! - Register each under its fixed prefix, rejecting collisions
//! - Nest everything into a single axum `Router`
//!
//! # Design Decisions
//! - Immutable after construction
//! - Exactly two groups; there is no public way to mount a third
//! - Tags are metadata for docs and logs only

use std::sync::Arc;

use axum::Router;

use crate::routing::matcher::{PathPrefix, RouteError};

/// Mount point of the song handlers.
pub const SONGS_PREFIX: &str = "/songs";

/// Mount point of the user handlers.
pub const USER_PREFIX: &str = "/user";

/// A named collection of handlers mounted under a common prefix.
#[derive(Debug)]
pub struct RouteGroup {
    tag: &'static str,
    prefix: PathPrefix,
    router: Router,
}

impl RouteGroup {
    pub fn new(tag: &'static str, prefix: &'static str, router: Router) -> Result<Self, RouteError> {
        Ok(Self {
            tag,
            prefix: PathPrefix::new(prefix)?,
            router,
        })
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn prefix(&self) -> &PathPrefix {
        &self.prefix
    }
}

/// Handler collections supplied by the song and user modules.
///
/// Both routers must already have their state applied.
#[derive(Debug, Default)]
pub struct RouteGroups {
    pub songs: Router,
    pub user: Router,
}

/// The frozen set of mounted route groups.
#[derive(Debug)]
pub struct RouteTable {
    groups: Vec<RouteGroup>,
}

impl RouteTable {
    /// Register the song group at `/songs` and the user group at `/user`.
    pub fn from_groups(groups: RouteGroups) -> Result<Self, RouteError> {
        let mut table = Self { groups: Vec::with_capacity(2) };
        table.register(RouteGroup::new("Songs", SONGS_PREFIX, groups.songs)?)?;
        table.register(RouteGroup::new("User", USER_PREFIX, groups.user)?)?;
        Ok(table)
    }

    fn register(&mut self, group: RouteGroup) -> Result<(), RouteError> {
        if let Some(existing) = self.groups.iter().find(|g| g.prefix.overlaps(&group.prefix)) {
            return Err(RouteError::Collision {
                existing: existing.prefix.to_string(),
                new: group.prefix.to_string(),
            });
        }

        tracing::debug!(tag = group.tag, prefix = %group.prefix, "Route group registered");
        self.groups.push(group);
        Ok(())
    }

    /// `(prefix, tag)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.groups.iter().map(|g| (g.prefix.as_str(), g.tag))
    }

    /// A cheap, cloneable prefix → tag lookup that outlives the table.
    pub fn index(&self) -> GroupIndex {
        GroupIndex {
            entries: self.groups.iter().map(|g| (g.prefix.clone(), g.tag)).collect(),
        }
    }

    /// Nest every group into one router.
    pub fn into_router(self) -> Router {
        self.groups
            .into_iter()
            .fold(Router::new(), |app, group| app.nest(group.prefix.as_str(), group.router))
    }
}

/// Maps request paths to the tag of the group that serves them.
#[derive(Debug, Clone)]
pub struct GroupIndex {
    entries: Arc<[(PathPrefix, &'static str)]>,
}

impl GroupIndex {
    /// Tag of the group that owns `path`, if any.
    pub fn group_for(&self, path: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(prefix, _)| prefix.matches(path))
            .map(|(_, tag)| *tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    fn groups() -> RouteGroups {
        RouteGroups {
            songs: Router::new().route("/list", get(|| async { "songs" })),
            user: Router::new().route("/analyze_text", get(|| async { "user" })),
        }
    }

    #[test]
    fn test_exactly_two_groups() {
        let table = RouteTable::from_groups(groups()).unwrap();
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries, vec![("/songs", "Songs"), ("/user", "User")]);
    }

    #[test]
    fn test_group_for_path() {
        let index = RouteTable::from_groups(groups()).unwrap().index();
        assert_eq!(index.group_for("/songs/list"), Some("Songs"));
        assert_eq!(index.group_for("/user"), Some("User"));
        assert_eq!(index.group_for("/users"), None);
        assert_eq!(index.group_for("/"), None);
    }

    #[test]
    fn test_collision_rejected() {
        let mut table = RouteTable::from_groups(groups()).unwrap();

        let duplicate = RouteGroup::new("Again", "/songs", Router::new()).unwrap();
        assert_eq!(
            table.register(duplicate).unwrap_err(),
            RouteError::Collision {
                existing: "/songs".to_string(),
                new: "/songs".to_string(),
            }
        );

        let nested = RouteGroup::new("Nested", "/user/admin", Router::new()).unwrap();
        assert!(matches!(table.register(nested), Err(RouteError::Collision { .. })));

        assert_eq!(table.entries().count(), 2);
    }
}
