//! Chime Calendar
//!
//! The host calendar engine: a [`CalendarEngine`](chime_ports::CalendarEngine)
//! implementation for the proleptic Gregorian calendar on top of `chrono` and
//! `chrono-tz`, plus an explicit cache that hands out shared engines per
//! (calendar, time zone) pair.
//!
//! ## Usage
//!
//! ```ignore
//! use chime_calendar::{EngineCache, GregorianEngine};
//! use chime_ports::Locale;
//!
//! // One-off region
//! let utc = GregorianEngine::region(chrono_tz::UTC, Locale::posix());
//!
//! // Regions resolved from identifiers, sharing engines
//! let cache = EngineCache::new();
//! let paris = cache.region("gregorian", "Europe/Paris", "fr_FR")?;
//! ```

mod cache;
mod config;
mod gregorian;

pub use cache::EngineCache;
pub use config::RegionConfig;
pub use gregorian::GregorianEngine;
