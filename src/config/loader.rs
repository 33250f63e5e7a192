//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    Override { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML config file. Missing sections fall back to defaults.
pub fn read_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Read config file");
    Ok(config)
}

/// Resolve the full configuration: defaults, then the optional file, then
/// environment overrides, then the command-line bind address. The result is
/// validated once, at the end.
pub fn resolve_config(
    path: Option<&Path>,
    cli_bind: Option<&str>,
) -> Result<ServiceConfig, ConfigError> {
    resolve_config_with(path, cli_bind, |key| std::env::var(key).ok())
}

/// [`resolve_config`] with an injectable environment.
pub fn resolve_config_with<F>(
    path: Option<&Path>,
    cli_bind: Option<&str>,
    lookup: F,
) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    if let Some(bind) = cli_bind {
        config.listener.bind_address = bind.to_string();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `BIND_ADDRESS`, `PRODUCTION_ORIGINS` and `LOG_FORMAT` overrides.
///
/// `lookup` abstracts the environment so tests can inject values.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    if let Some(origins) = lookup("PRODUCTION_ORIGINS") {
        config.cors.production_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(format) = lookup("LOG_FORMAT") {
        config.observability.log_format = format
            .parse::<LogFormat>()
            .map_err(|reason| ConfigError::Override { var: "LOG_FORMAT", reason })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_production_origins_override() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("PRODUCTION_ORIGINS", "https://a.example.com, https://b.example.com,")]),
        )
        .unwrap();

        assert_eq!(
            config.cors.production_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn test_bad_log_format_override() {
        let mut config = ServiceConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Override { var: "LOG_FORMAT", .. }));
    }

    #[test]
    fn test_read_config_file() {
        let path = std::env::temp_dir().join(format!("coach-config-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:9000\"").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_config_reports_validation() {
        let path = std::env::temp_dir().join(format!("coach-invalid-{}.toml", std::process::id()));
        fs::write(&path, "[cors]\nproduction_origins = [\"http://insecure.example.com\"]\n").unwrap();

        let err = resolve_config_with(Some(&path), None, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("must use https"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_cli_bind_is_validated() {
        let err = resolve_config_with(None, Some("garbage:address"), env(&[])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(
                errors,
                vec![ValidationError::BindAddress("garbage:address".to_string())]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_bind_beats_env_bind() {
        let config = resolve_config_with(
            None,
            Some("127.0.0.1:7000"),
            env(&[("BIND_ADDRESS", "127.0.0.1:6000")]),
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");

        let config =
            resolve_config_with(None, None, env(&[("BIND_ADDRESS", "127.0.0.1:6000")])).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:6000");
    }

    #[test]
    fn test_valid_cli_bind_cannot_hide_env_errors() {
        let err = resolve_config_with(
            None,
            Some("127.0.0.1:7000"),
            env(&[("PRODUCTION_ORIGINS", "http://insecure.example.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_config_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
