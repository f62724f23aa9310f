use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::CalendarEngine;
use crate::error::{CalendarError, CalendarResult};

/// Calendar system identifier (e.g. "gregorian", "iso8601")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarId(String);

impl CalendarId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_ascii_lowercase())
    }

    pub fn gregorian() -> Self {
        Self::new("gregorian")
    }

    pub fn iso8601() -> Self {
        Self::new("iso8601")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locale identifier (e.g. "en_US_POSIX")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(identifier: impl Into<String>) -> CalendarResult<Self> {
        let identifier = identifier.into();
        let valid = !identifier.is_empty()
            && identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '@' || c == '=');
        if valid {
            Ok(Self(identifier))
        } else {
            Err(CalendarError::InvalidLocale(identifier))
        }
    }

    /// The fixed, locale-independent POSIX locale
    pub fn posix() -> Self {
        Self("en_US_POSIX".to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable bundle of calendar system, time zone and locale
///
/// Two regions are equivalent, and compare equal, when their calendar system,
/// time zone identifier and locale match. The engine instance itself is not
/// compared, so regions built from different caches still agree.
#[derive(Clone)]
pub struct Region {
    engine: Arc<dyn CalendarEngine>,
    locale: Locale,
}

impl Region {
    pub fn new(engine: Arc<dyn CalendarEngine>, locale: Locale) -> Self {
        Self { engine, locale }
    }

    pub fn engine(&self) -> &dyn CalendarEngine {
        self.engine.as_ref()
    }

    pub fn shared_engine(&self) -> Arc<dyn CalendarEngine> {
        Arc::clone(&self.engine)
    }

    pub fn calendar(&self) -> CalendarId {
        self.engine.calendar()
    }

    pub fn time_zone(&self) -> &str {
        self.engine.time_zone()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Same calendar and time zone, different locale
    pub fn with_locale(&self, locale: Locale) -> Region {
        Region::new(self.shared_engine(), locale)
    }

    /// Same locale, different engine (calendar and/or time zone)
    pub fn with_engine(&self, engine: Arc<dyn CalendarEngine>) -> Region {
        Region::new(engine, self.locale.clone())
    }

    pub fn is_equivalent(&self, other: &Region) -> bool {
        self.calendar() == other.calendar()
            && self.time_zone() == other.time_zone()
            && self.locale == other.locale
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent(other)
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.calendar().hash(state);
        self.time_zone().hash(state);
        self.locale.hash(state);
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("calendar", &self.calendar())
            .field("time_zone", &self.time_zone())
            .field("locale", &self.locale)
            .finish()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.calendar(), self.time_zone(), self.locale)
    }
}
