//! Configuration management for the API server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is read first when present.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Tracing filter directives (`RUST_LOG` syntax)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Allowed CORS origin, `*` for any
    pub cors_allow_origin: String,
    /// Load the demo data set at startup
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(8080),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
            shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(30),
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "*".to_string()),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(true),
        }
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert_eq!(config.cors_allow_origin, "*");
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
            ("LOG_FORMAT", "JSON"),
            ("SHUTDOWN_TIMEOUT", "5"),
            ("CORS_ALLOW_ORIGIN", "https://shop.example.com"),
            ("SEED_DEMO_DATA", "off"),
        ]));

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.shutdown_timeout, 5);
        assert_eq!(config.cors_allow_origin, "https://shop.example.com");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "http"),
            ("SHUTDOWN_TIMEOUT", "-1"),
            ("SEED_DEMO_DATA", "maybe"),
            ("CORS_ALLOW_ORIGIN", " "),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(config.shutdown_timeout, 30);
        assert!(config.seed_demo_data);
        assert_eq!(config.cors_allow_origin, "*");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
