//! Configuration schema definitions.
//!
//! All types derive Serde traits so a config can be deserialized from a
//! TOML file; the same fields map onto environment variables in
//! [`loader`](crate::config::loader).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Broker backend settings.
    pub broker: BrokerConfig,

    /// Response forwarding settings.
    pub forwarding: ForwardConfig,

    /// Log level (`debug`, `info`, `warn`, `error`).
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            forwarding: ForwardConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Broker backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Bootstrap servers. An empty string disables the broker backend.
    pub brokers: String,

    /// Topic every message is produced to.
    pub topic: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topic: "a-topic".to_string(),
        }
    }
}

/// Response forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwardConfig {
    /// Master switch; when off the middleware passes requests through
    /// without any capture cost.
    pub enabled: bool,

    /// Destination URL responses are re-published to.
    pub endpoint: String,

    /// Bearer token for the destination.
    pub token: String,

    /// Method + path fragments excluded from forwarding.
    pub ignore: Vec<IgnoreRule>,
}

/// A `METHOD:path-substring` pair excluded from forwarding.
///
/// Serde carries the rule in its string form, so a TOML list holds the same
/// entries as the `|`-separated environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct IgnoreRule {
    /// HTTP method, compared case-insensitively.
    pub method: String,

    /// Path fragment, matched by substring containment.
    pub fragment: String,
}

impl IgnoreRule {
    /// True when `method` matches and `path` contains the fragment.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method.eq_ignore_ascii_case(method) && path.contains(&self.fragment)
    }
}

/// A malformed ignore-list entry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid ignore rule {0:?}, expected METHOD:path-substring")]
pub struct InvalidIgnoreRule(pub String);

impl std::str::FromStr for IgnoreRule {
    type Err = InvalidIgnoreRule;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        match entry.split_once(':') {
            Some((method, fragment)) if !method.is_empty() => Ok(Self {
                method: method.to_string(),
                fragment: fragment.to_string(),
            }),
            _ => Err(InvalidIgnoreRule(entry.to_string())),
        }
    }
}

impl TryFrom<String> for IgnoreRule {
    type Error = InvalidIgnoreRule;

    fn try_from(entry: String) -> Result<Self, Self::Error> {
        entry.parse()
    }
}

impl From<IgnoreRule> for String {
    fn from(rule: IgnoreRule) -> Self {
        format!("{}:{}", rule.method, rule.fragment)
    }
}

/// Parse a `|`-separated ignore list, e.g. `GET:health|POST:send`.
///
/// Malformed entries are logged and skipped so a typo in one rule does not
/// take the whole list down.
pub fn parse_ignore_list(list: &str) -> Vec<IgnoreRule> {
    list.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse() {
            Ok(rule) => Some(rule),
            Err(err) => {
                warn!(%err, "skipping ignore-list entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_rule_parse() {
        let rule: IgnoreRule = "GET:health".parse().unwrap();
        assert_eq!(rule.method, "GET");
        assert_eq!(rule.fragment, "health");
    }

    #[test]
    fn test_ignore_rule_rejects_missing_method() {
        assert!(":health".parse::<IgnoreRule>().is_err());
        assert!("health".parse::<IgnoreRule>().is_err());
    }

    #[test]
    fn test_ignore_rule_matches_case_insensitive_method() {
        let rule: IgnoreRule = "get:health".parse().unwrap();
        assert!(rule.matches("GET", "/health"));
        assert!(rule.matches("Get", "/api/healthcheck"));
        assert!(!rule.matches("POST", "/health"));
    }

    #[test]
    fn test_ignore_rule_matches_path_substring() {
        let rule: IgnoreRule = "GET:health".parse().unwrap();
        assert!(rule.matches("GET", "/internal/health/live"));
        assert!(!rule.matches("GET", "/hello"));
    }

    #[test]
    fn test_parse_ignore_list_skips_invalid_entries() {
        let rules = parse_ignore_list("GET:health|bogus|POST:send|");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].method, "GET");
        assert_eq!(rules[1].fragment, "send");
    }

    #[test]
    fn test_parse_ignore_list_empty() {
        assert!(parse_ignore_list("").is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
            log_level = "debug"

            [broker]
            brokers = "kafka:9092"
            topic = "events"

            [forwarding]
            enabled = true
            endpoint = "http://gateway.local/ingest"
            token = "secret"
            ignore = ["GET:health", "POST:send"]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.broker.brokers, "kafka:9092");
        assert!(config.forwarding.enabled);
        assert_eq!(config.forwarding.ignore.len(), 2);
        assert!(config.forwarding.ignore[0].matches("GET", "/health"));
    }

    #[test]
    fn test_config_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.broker.brokers, "localhost:9092");
        assert_eq!(config.broker.topic, "a-topic");
        assert_eq!(config.log_level, "info");
        assert!(!config.forwarding.enabled);
        assert!(config.forwarding.ignore.is_empty());
    }
}
