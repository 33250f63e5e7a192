//! Path prefix matching.
//!
//! # Responsibilities
//! - Validate mount prefixes
//! - Match a request path against a prefix on segment boundaries
//! - Detect overlapping prefixes before they are mounted
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - `/user` matches `/user` and `/user/...` but not `/users`
//! - No regex, no wildcards

use std::fmt;

use thiserror::Error;

/// Errors raised while registering route groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    #[error("route prefix '{new}' collides with already registered '{existing}'")]
    Collision { existing: String, new: String },
}

/// A validated mount prefix such as `/songs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix(&'static str);

impl PathPrefix {
    /// Validate a prefix literal.
    pub fn new(prefix: &'static str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason,
        };

        if !prefix.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if prefix.len() == 1 {
            return Err(invalid("cannot mount at the root"));
        }
        if prefix.ends_with('/') {
            return Err(invalid("must not end with '/'"));
        }
        if prefix.contains("//") {
            return Err(invalid("must not contain empty segments"));
        }
        if prefix.contains(['*', '{', '}', ':']) {
            return Err(invalid("must be a literal path"));
        }

        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// True if `path` is this prefix or lies below it.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.0) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// True if either prefix would capture paths of the other.
    pub fn overlaps(&self, other: &PathPrefix) -> bool {
        self.matches(other.0) || other.matches(self.0)
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
