//! CLI configuration (env-driven).
//!
//! Flags override these values; see `commands::Cli`.

use anyhow::{Context, Result};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default output format (`EID_FORMAT`).
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit logs as JSON lines (`EID_LOG_JSON`).
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let format = lookup("EID_FORMAT")
            .map(|v| v.parse::<OutputFormat>())
            .transpose()
            .context("EID_FORMAT must be 'table' or 'json'.")?
            .unwrap_or_default();

        let log_level = lookup("EID_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_json = lookup("EID_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            format,
            log_level,
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("EID_FORMAT", "json"),
            ("EID_LOG_LEVEL", "debug"),
            ("EID_LOG_JSON", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_bad_format() {
        assert!(Config::from_lookup(lookup(&[("EID_FORMAT", "xml")])).is_err());
    }
}
