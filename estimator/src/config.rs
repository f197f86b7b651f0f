//! Engine configuration, loaded from an optional JSON file

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::baseline::WORLD;
use crate::error::ConfigError;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Milliseconds between countdown ticks
    pub tick_interval_ms: u64,
    /// Country used when no location is known
    pub default_country: String,
    /// Page that shared links point at
    pub share_base_url: String,
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            default_country: WORLD.to_string(),
            share_base_url: "https://example.invalid/".to_string(),
            verbose: false,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.default_country, "World");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "default_country": "Denmark" }"#).unwrap();
        assert_eq!(config.default_country, "Denmark");
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "tick_interval_ms": 0 }"#),
            Err(ConfigError::ZeroTickInterval)
        ));
        assert!(matches!(
            EngineConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
