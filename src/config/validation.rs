//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate origins (scheme + host + optional port, nothing else)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("invalid origin '{origin}': {reason}")]
    Origin { origin: String, reason: String },

    #[error("production origin '{0}' must use https")]
    InsecureProductionOrigin(String),

    #[error("production origin list is empty")]
    NoProductionOrigins,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.cors.production_origins.is_empty() {
        errors.push(ValidationError::NoProductionOrigins);
    }

    for origin in &config.cors.production_origins {
        match check_origin(origin) {
            Ok(url) if url.scheme() != "https" => {
                errors.push(ValidationError::InsecureProductionOrigin(origin.clone()));
            }
            Ok(_) => {}
            Err(reason) => errors.push(ValidationError::Origin {
                origin: origin.clone(),
                reason,
            }),
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "limits.max_body_size" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `origin` is exactly what a browser would send in an `Origin` header.
///
/// Origins are compared by exact string match, so anything a browser would
/// never send (paths, trailing slashes, wildcards, uppercase schemes) can never
/// match and is rejected here.
pub fn check_origin(origin: &str) -> Result<Url, String> {
    if origin.contains('*') {
        return Err("wildcards are not supported".to_string());
    }

    let url = Url::parse(origin).map_err(|e| e.to_string())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err("credentials are not allowed".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }

    // `Url` normalizes an empty path to "/", so compare against the serialized
    // origin to catch trailing slashes, paths and case differences.
    let serialized = url.origin().ascii_serialization();
    if serialized != origin {
        return Err(format!("must be written as '{}'", serialized));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_check_origin_accepts_browser_origins() {
        assert!(check_origin("https://coach.example.com").is_ok());
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn test_check_origin_rejects_non_origins() {
        for origin in [
            "https://coach.example.com/",
            "https://coach.example.com/app",
            "https://*.example.com",
            "*",
            "coach.example.com",
            "ftp://coach.example.com",
            "https://coach.example.com?x=1",
            "HTTPS://coach.example.com",
            "https://coach.example.com:443",
        ] {
            assert!(check_origin(origin).is_err(), "{origin:?} should be rejected");
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.cors.production_origins = vec![
            "http://coach.example.com".to_string(),
            "https://coach.example.com/".to_string(),
        ];
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::BindAddress("not-an-address".to_string())));
        assert!(errors.contains(&ValidationError::InsecureProductionOrigin(
            "http://coach.example.com".to_string()
        )));
        assert!(errors.contains(&ValidationError::Zero { field: "timeouts.request_secs" }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Origin { origin, .. } if origin == "https://coach.example.com/")));
    }

    #[test]
    fn test_empty_production_list_rejected() {
        let mut config = ServiceConfig::default();
        config.cors.production_origins.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::NoProductionOrigins]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MetricsAddress("nope".to_string())]
        );
    }
}
