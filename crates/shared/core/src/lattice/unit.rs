use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the eight standard calendar granularities
///
/// The derived ordering runs from finest to coarsest, so `Unit::Era` is the
/// greatest value and `Unit::Nanosecond` the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Nanosecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
    Era,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown calendar unit: {0}")]
pub struct ParseUnitError(pub String);

impl Unit {
    /// All units, finest first
    pub const ALL: [Unit; 8] = [
        Unit::Nanosecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Month,
        Unit::Year,
        Unit::Era,
    ];

    /// Position in [`Unit::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next coarser unit, `None` for era
    pub fn coarser(self) -> Option<Unit> {
        Unit::ALL.get(self.index() + 1).copied()
    }

    /// Next finer unit, `None` for nanosecond
    pub fn finer(self) -> Option<Unit> {
        self.index().checked_sub(1).map(|i| Unit::ALL[i])
    }

    pub fn is_coarser_than(self, other: Unit) -> bool {
        self > other
    }

    pub fn is_finer_than(self, other: Unit) -> bool {
        self < other
    }

    /// Length in seconds for units that never vary with the calendar
    pub fn fixed_seconds(self) -> Option<f64> {
        match self {
            Unit::Hour => Some(3_600.0),
            Unit::Minute => Some(60.0),
            Unit::Second => Some(1.0),
            Unit::Nanosecond => Some(1e-9),
            Unit::Day | Unit::Month | Unit::Year | Unit::Era => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Nanosecond => "nanosecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Month => "month",
            Unit::Year => "year",
            Unit::Era => "era",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_suffix('s').unwrap_or(&lowered);
        Unit::ALL
            .into_iter()
            .find(|unit| unit.name() == name)
            .ok_or_else(|| ParseUnitError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Unit::Era > Unit::Year);
        assert!(Unit::Year > Unit::Month);
        assert!(Unit::Month > Unit::Day);
        assert!(Unit::Day > Unit::Hour);
        assert!(Unit::Second > Unit::Nanosecond);
        assert!(Unit::Day.is_coarser_than(Unit::Minute));
        assert!(Unit::Minute.is_finer_than(Unit::Day));
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(Unit::Day.coarser(), Some(Unit::Month));
        assert_eq!(Unit::Day.finer(), Some(Unit::Hour));
        assert_eq!(Unit::Era.coarser(), None);
        assert_eq!(Unit::Nanosecond.finer(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Minutes".parse::<Unit>(), Ok(Unit::Minute));
        assert_eq!("era".parse::<Unit>(), Ok(Unit::Era));
        assert!("fortnight".parse::<Unit>().is_err());
    }
}
