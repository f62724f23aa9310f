use chime_ports::{CalendarResult, Region};
use serde::{Deserialize, Serialize};

use crate::EngineCache;

/// Region as it appears in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Calendar system identifier
    #[serde(default = "default_calendar")]
    pub calendar: String,
    /// IANA time zone name
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Locale identifier
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            calendar: default_calendar(),
            time_zone: default_time_zone(),
            locale: default_locale(),
        }
    }
}

impl RegionConfig {
    /// Resolve into a region, sharing engines through `cache`
    pub fn build(&self, cache: &EngineCache) -> CalendarResult<Region> {
        cache.region(&self.calendar, &self.time_zone, &self.locale)
    }

    /// Parse a region description from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn default_calendar() -> String {
    "gregorian".to_string()
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_locale() -> String {
    "en_US_POSIX".to_string()
}
