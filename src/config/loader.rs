//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::schema::{parse_ignore_list, BrokerConfig, ForwardConfig, RelayConfig};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A semantic problem in an otherwise well-formed config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("forwarding is enabled but no endpoint is configured")]
    MissingEndpoint,

    #[error("forwarding endpoint {0:?} is not a valid URL")]
    InvalidEndpoint(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Semantic checks beyond what serde enforces.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.forwarding.enabled {
        if config.forwarding.endpoint.is_empty() {
            errors.push(ValidationError::MissingEndpoint);
        } else if Url::parse(&config.forwarding.endpoint).is_err() {
            errors.push(ValidationError::InvalidEndpoint(
                config.forwarding.endpoint.clone(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl RelayConfig {
    /// Build a configuration from environment variables.
    ///
    /// Consumed variables and their defaults:
    /// - `KAFKA_BROKER` (`localhost:9092`)
    /// - `KAFKA_TOPIC` (`a-topic`)
    /// - `GATEWAY_ENABLED` (`false`)
    /// - `GATEWAY_API_URL` (empty)
    /// - `GATEWAY_TOKEN` (empty)
    /// - `GATEWAY_IGNORE_ENDPOINTS` (empty) — format `GET:health|POST:send`
    /// - `LOG_LEVEL` (`info`)
    ///
    /// Never fails: unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            broker: BrokerConfig {
                brokers: env_or("KAFKA_BROKER", "localhost:9092"),
                topic: env_or("KAFKA_TOPIC", "a-topic"),
            },
            forwarding: ForwardConfig {
                enabled: env_or("GATEWAY_ENABLED", "false").eq_ignore_ascii_case("true"),
                endpoint: env_or("GATEWAY_API_URL", ""),
                token: env_or("GATEWAY_TOKEN", ""),
                ignore: parse_ignore_list(&env_or("GATEWAY_IGNORE_ENDPOINTS", "")),
            },
            log_level: env_or("LOG_LEVEL", "info"),
        }
    }
}

/// Read an environment variable, falling back to `default` when unset or empty.
fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_disabled_forwarding() {
        let config = RelayConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_requires_endpoint_when_enabled() {
        let mut config = RelayConfig::default();
        config.forwarding.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingEndpoint]);
    }

    #[test]
    fn test_validate_rejects_unparseable_endpoint() {
        let mut config = RelayConfig::default();
        config.forwarding.enabled = true;
        config.forwarding.endpoint = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec![ValidationError::MissingEndpoint]);
        assert!(err.to_string().contains("no endpoint is configured"));
    }

    // Environment access lives in a single test so parallel tests never
    // observe each other's variables.
    #[test]
    fn test_from_env_defaults_and_overrides() {
        for key in [
            "KAFKA_BROKER",
            "KAFKA_TOPIC",
            "GATEWAY_ENABLED",
            "GATEWAY_API_URL",
            "GATEWAY_TOKEN",
            "GATEWAY_IGNORE_ENDPOINTS",
            "LOG_LEVEL",
        ] {
            env::remove_var(key);
        }

        let config = RelayConfig::from_env();
        assert_eq!(config.broker.brokers, "localhost:9092");
        assert_eq!(config.broker.topic, "a-topic");
        assert_eq!(config.log_level, "info");
        assert!(!config.forwarding.enabled);

        env::set_var("KAFKA_BROKER", "kafka:9092");
        env::set_var("GATEWAY_ENABLED", "TRUE");
        env::set_var("GATEWAY_API_URL", "http://gateway.local/ingest");
        env::set_var("GATEWAY_IGNORE_ENDPOINTS", "GET:health|POST:send");

        let config = RelayConfig::from_env();
        assert_eq!(config.broker.brokers, "kafka:9092");
        assert!(config.forwarding.enabled);
        assert_eq!(config.forwarding.endpoint, "http://gateway.local/ingest");
        assert_eq!(config.forwarding.ignore.len(), 2);

        for key in [
            "KAFKA_BROKER",
            "GATEWAY_ENABLED",
            "GATEWAY_API_URL",
            "GATEWAY_IGNORE_ENDPOINTS",
        ] {
            env::remove_var(key);
        }
    }
}
