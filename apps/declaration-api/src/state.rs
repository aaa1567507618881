//! Application state for the Declaration API

use assembly_engine::AssemblyEngine;

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    /// Budget for one Typst compile
    pub render_timeout_ms: u64,
    /// Largest accepted request body
    pub max_payload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3002,
            render_timeout_ms: 10_000,
            max_payload_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Read `PORT`, `RENDER_TIMEOUT_MS` and `MAX_PAYLOAD_BYTES`; unset or
    /// unparsable values keep their defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or(lookup("PORT"), defaults.port),
            render_timeout_ms: parse_or(lookup("RENDER_TIMEOUT_MS"), defaults.render_timeout_ms),
            max_payload_bytes: parse_or(lookup("MAX_PAYLOAD_BYTES"), defaults.max_payload_bytes),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

pub struct AppState {
    pub config: ApiConfig,
    pub engine: AssemblyEngine,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        tracing::info!(
            render_timeout_ms = config.render_timeout_ms,
            max_payload_bytes = config.max_payload_bytes,
            "Configured declaration engine"
        );
        Self {
            config,
            engine: AssemblyEngine::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(ApiConfig::from_lookup(lookup(&[])), ApiConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("RENDER_TIMEOUT_MS", " 2500 "),
            ("MAX_PAYLOAD_BYTES", "1024"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.render_timeout_ms, 2500);
        assert_eq!(config.max_payload_bytes, 1024);
    }

    #[test]
    fn test_garbage_falls_back() {
        let config =
            ApiConfig::from_lookup(lookup(&[("PORT", "http"), ("RENDER_TIMEOUT_MS", "-1")]));
        assert_eq!(config.port, 3002);
        assert_eq!(config.render_timeout_ms, 10_000);
    }
}
