//! Monitoring configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use shared::models::DEFAULT_SOURCE;

use crate::guard::DEFAULT_CONTENT_PREFIX;

/// Monitoring configuration.
///
/// Configuration values can be set via environment variables (a `.env`
/// file is honoured):
/// - `PORTAL_MONITOR_RESOURCE_TIMING`: observe resource timing (default: true)
/// - `PORTAL_MONITOR_MARKUP_GUARD`: inspect markup assignments (default: true)
/// - `PORTAL_MONITOR_DEBUG`: enable debug helpers (default: false)
/// - `PORTAL_MONITOR_SOURCE`: source label on samples (default: "browser")
/// - `PORTAL_MONITOR_CONTENT_PREFIX`: characters of content kept in reports (default: 200)
/// - `PORTAL_MONITOR_LOG_JSON`: emit logs as JSON (default: false)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Whether the resource timing observer is started.
    pub resource_timing: bool,
    /// Whether markup assignments are inspected.
    pub markup_guard: bool,
    /// Whether debug helpers emit output.
    pub debug: bool,
    /// Source label attached to samples.
    pub source: String,
    /// Maximum characters of markup copied into a security event.
    pub content_prefix: usize,
    /// Whether logs are formatted as JSON.
    pub log_json: bool,
}

impl MonitorConfig {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let resource_timing =
            parse_flag(&lookup, "PORTAL_MONITOR_RESOURCE_TIMING", defaults.resource_timing)?;
        let markup_guard =
            parse_flag(&lookup, "PORTAL_MONITOR_MARKUP_GUARD", defaults.markup_guard)?;
        let debug = parse_flag(&lookup, "PORTAL_MONITOR_DEBUG", defaults.debug)?;
        let log_json = parse_flag(&lookup, "PORTAL_MONITOR_LOG_JSON", defaults.log_json)?;

        let source = lookup("PORTAL_MONITOR_SOURCE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.source);

        let content_prefix = lookup("PORTAL_MONITOR_CONTENT_PREFIX")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("PORTAL_MONITOR_CONTENT_PREFIX must be a non-negative integer")?
            .unwrap_or(defaults.content_prefix);

        Ok(Self {
            resource_timing,
            markup_guard,
            debug,
            source,
            content_prefix,
            log_json,
        })
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            resource_timing: true,
            markup_guard: true,
            debug: false,
            source: DEFAULT_SOURCE.to_string(),
            content_prefix: DEFAULT_CONTENT_PREFIX,
            log_json: false,
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default_values() {
        let config = MonitorConfig::default();
        assert!(config.resource_timing);
        assert!(config.markup_guard);
        assert!(!config.debug);
        assert_eq!(config.source, "browser");
        assert_eq!(config.content_prefix, 200);
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = assert_ok!(MonitorConfig::from_lookup(|_| None));
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("PORTAL_MONITOR_RESOURCE_TIMING", "off"),
            ("PORTAL_MONITOR_DEBUG", "1"),
            ("PORTAL_MONITOR_SOURCE", "web-portal"),
            ("PORTAL_MONITOR_CONTENT_PREFIX", "64"),
        ]))
        .unwrap();

        assert!(!config.resource_timing);
        assert!(config.markup_guard);
        assert!(config.debug);
        assert_eq!(config.source, "web-portal");
        assert_eq!(config.content_prefix, 64);
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        assert_err!(MonitorConfig::from_lookup(lookup_from(&[(
            "PORTAL_MONITOR_DEBUG",
            "maybe"
        )])));
    }

    #[test]
    fn test_invalid_prefix_is_rejected() {
        let result =
            MonitorConfig::from_lookup(lookup_from(&[("PORTAL_MONITOR_CONTENT_PREFIX", "-5")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_source_falls_back() {
        let config =
            MonitorConfig::from_lookup(lookup_from(&[("PORTAL_MONITOR_SOURCE", "  ")])).unwrap();
        assert_eq!(config.source, "browser");
    }
}
