use chime_ports::{CalendarEngine, CalendarError, CalendarId, CalendarResult, Locale, Region};
use chrono_tz::Tz;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

use crate::GregorianEngine;

/// Shared engines keyed by (calendar, time zone)
///
/// Constructed once by the application and passed by reference to whatever
/// builds regions. Lookups are sharded, so concurrent schedules resolving
/// regions never contend on a single lock.
#[derive(Debug, Default)]
pub struct EngineCache {
    engines: DashMap<(CalendarId, String), Arc<dyn CalendarEngine>>,
}

impl EngineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine for a calendar identifier and IANA time zone name
    pub fn engine(&self, calendar: &str, time_zone: &str) -> CalendarResult<Arc<dyn CalendarEngine>> {
        let calendar = CalendarId::new(calendar);
        let key = (calendar.clone(), time_zone.to_string());
        if let Some(engine) = self.engines.get(&key) {
            return Ok(Arc::clone(engine.value()));
        }

        let tz: Tz = time_zone
            .parse()
            .map_err(|_| CalendarError::UnknownTimeZone(time_zone.to_string()))?;
        let engine: Arc<dyn CalendarEngine> = Arc::new(GregorianEngine::new(calendar, tz)?);
        debug!("Created calendar engine for {}/{}", key.0, key.1);

        let entry = self.engines.entry(key).or_insert(engine);
        Ok(Arc::clone(entry.value()))
    }

    /// Region for calendar, time zone and locale identifiers
    pub fn region(&self, calendar: &str, time_zone: &str, locale: &str) -> CalendarResult<Region> {
        let engine = self.engine(calendar, time_zone)?;
        Ok(Region::new(engine, Locale::new(locale)?))
    }

    /// `region` moved to another time zone, keeping calendar and locale
    pub fn retarget(&self, region: &Region, time_zone: &str) -> CalendarResult<Region> {
        let engine = self.engine(region.calendar().as_str(), time_zone)?;
        Ok(region.with_engine(engine))
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
