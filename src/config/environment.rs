//! Deployment mode selection from the process environment.
//!
//! # Responsibilities
//! - Read the `PRODUCTION` flag exactly once at startup
//! - Map the raw value to a [`DeploymentMode`]
//! - Log the decision, including fallbacks caused by near-miss values
//!
//! # Design Decisions
//! - Only the exact string `"true"` selects production (case-sensitive)
//! - Missing, malformed or non-UTF-8 values select development
//! - The pure mapping (`from_flag`) is separate from the env read so tests
//!   never touch the real process environment

use std::ffi::OsStr;
use std::fmt;

/// Name of the environment variable that selects production mode.
pub const PRODUCTION_FLAG: &str = "PRODUCTION";

/// The only flag value that selects production mode.
const PRODUCTION_VALUE: &str = "true";

/// Which origin allow-list variant applies to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Production,
    Development,
}

impl DeploymentMode {
    /// Map a raw flag value to a mode.
    pub fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some(PRODUCTION_VALUE) => DeploymentMode::Production,
            _ => DeploymentMode::Development,
        }
    }

    /// Read [`PRODUCTION_FLAG`] from the process environment and log the outcome.
    pub fn from_env() -> Self {
        let raw = std::env::var_os(PRODUCTION_FLAG);
        let decision = FlagDecision::classify(raw.as_deref());
        decision.log();
        decision.mode()
    }

    pub fn is_production(self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

/// How a raw `PRODUCTION` value was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagDecision {
    /// Exactly `"true"`.
    Production,
    /// Variable absent.
    Unset,
    /// Set to anything else. `near_miss` flags case or whitespace variants of `true`.
    Mismatch { value: String, near_miss: bool },
    /// Set, but not valid UTF-8.
    NonUtf8,
}

impl FlagDecision {
    pub fn classify(raw: Option<&OsStr>) -> Self {
        match raw.map(OsStr::to_str) {
            None => FlagDecision::Unset,
            Some(None) => FlagDecision::NonUtf8,
            Some(Some(PRODUCTION_VALUE)) => FlagDecision::Production,
            Some(Some(other)) => FlagDecision::Mismatch {
                value: other.to_string(),
                near_miss: other.trim().eq_ignore_ascii_case(PRODUCTION_VALUE),
            },
        }
    }

    pub fn mode(&self) -> DeploymentMode {
        match self {
            FlagDecision::Production => DeploymentMode::Production,
            _ => DeploymentMode::Development,
        }
    }

    /// True for the fallbacks an operator should hear about.
    pub fn is_warning(&self) -> bool {
        matches!(self, FlagDecision::Mismatch { .. } | FlagDecision::NonUtf8)
    }

    fn log(&self) {
        match self {
            FlagDecision::Production => {
                tracing::info!(flag = PRODUCTION_FLAG, "Production mode selected");
            }
            FlagDecision::Unset => {
                tracing::info!(
                    flag = PRODUCTION_FLAG,
                    "Flag not set, development mode selected"
                );
            }
            FlagDecision::Mismatch { value, near_miss } => {
                tracing::warn!(
                    flag = PRODUCTION_FLAG,
                    value = %value,
                    near_miss,
                    "Flag is set but is not exactly \"true\", falling back to development mode"
                );
            }
            FlagDecision::NonUtf8 => {
                tracing::warn!(
                    flag = PRODUCTION_FLAG,
                    "Flag is not valid UTF-8, falling back to development mode"
                );
            }
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Production => write!(f, "production"),
            DeploymentMode::Development => write!(f, "development"),
        }
    }
}
