/*!
 * Shim Configuration
 *
 * The syscall layer has no tunables; this only covers log output.
 */

use serde::{Deserialize, Serialize};

/// Default `EnvFilter` directive
pub const DEFAULT_FILTER: &str = "info";

/// Log output configuration
///
/// Environment variables:
/// - VMINIT_LOG: filter directive (falls back to RUST_LOG, then `info`)
/// - VMINIT_TRACE_JSON: JSON output when `1` or `true`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,

    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl TracingConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup("VMINIT_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let json = lookup("VMINIT_TRACE_JSON")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { filter, json }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TracingConfig::from_lookup(lookup_in(&[]));
        assert_eq!(config, TracingConfig::default());
    }

    #[test]
    fn test_vminit_log_wins_over_rust_log() {
        let config = TracingConfig::from_lookup(lookup_in(&[
            ("VMINIT_LOG", "vminit_shim=debug"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.filter, "vminit_shim=debug");

        let config = TracingConfig::from_lookup(lookup_in(&[("RUST_LOG", "warn")]));
        assert_eq!(config.filter, "warn");
    }

    #[test]
    fn test_json_flag() {
        for (value, expected) in [("1", true), ("TRUE", true), ("true", true), ("0", false), ("yes", false)] {
            let config = TracingConfig::from_lookup(lookup_in(&[("VMINIT_TRACE_JSON", value)]));
            assert_eq!(config.json, expected, "VMINIT_TRACE_JSON={value}");
        }
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TracingConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert_eq!(config, TracingConfig::default().with_json(true));
    }
}
