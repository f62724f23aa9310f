//! Scheduler configuration

use chime_calendar::{EngineCache, RegionConfig};
use chime_clock::SystemClock;
use chime_core::Duration;
use chime_ports::CalendarError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Channel capacity must be at least 1")]
    InvalidCapacity,
    #[error("Invalid region: {0}")]
    Region(#[from] CalendarError),
}

/// Settings shared by the schedules of an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeConfig {
    /// How early (in clock milliseconds) a wake-up still counts as on time
    #[serde(default)]
    pub tolerance_ms: u64,
    /// Buffered values per spawned schedule
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Region of the system clock schedules observe
    #[serde(default)]
    pub region: RegionConfig,
}

impl Default for StrikeConfig {
    fn default() -> Self {
        StrikeConfig {
            tolerance_ms: 0,
            channel_capacity: default_channel_capacity(),
            region: RegionConfig::default(),
        }
    }
}

fn default_channel_capacity() -> usize {
    16
}

/// Load scheduler configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StrikeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<StrikeConfig, ConfigError> {
    let config: StrikeConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<StrikeConfig, ConfigError> {
    load_config_from_str(include_str!("strike_config.json"))
}

impl StrikeConfig {
    pub fn tolerance(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.tolerance_ms).unwrap_or(i64::MAX))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }

    /// System clock in the configured region
    pub fn system_clock(&self, cache: &EngineCache) -> Result<SystemClock, ConfigError> {
        Ok(SystemClock::new(self.region.build(cache)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_ports::Clock;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        config.validate().unwrap();
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config.tolerance(), Duration::milliseconds(1));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = load_config_from_str(r#"{ "region": { "time_zone": "Europe/Madrid" } }"#).unwrap();
        assert_eq!(config.tolerance_ms, 0);
        assert_eq!(config.channel_capacity, 16);
        let clock = config.system_clock(&EngineCache::new()).unwrap();
        assert_eq!(clock.region().time_zone(), "Europe/Madrid");
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let config = load_config_from_str(r#"{ "channel_capacity": 0 }"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCapacity)));
    }

    #[test]
    fn test_unknown_zone_is_reported() {
        let config = load_config_from_str(r#"{ "region": { "time_zone": "Nowhere/Special" } }"#).unwrap();
        assert!(matches!(
            config.system_clock(&EngineCache::new()),
            Err(ConfigError::Region(CalendarError::UnknownTimeZone(_)))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("strike-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{ "tolerance_ms": 5, "channel_capacity": 4 }"#).unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.tolerance_ms, 5);
        assert_eq!(config.channel_capacity, 4);

        assert!(matches!(load_config(&path), Err(ConfigError::IoError(_))));
    }
}
