//! Calendar component values
//!
//! A [`Components`] holds at most one value per [`Unit`]. Which units are
//! present is what distinguishes a "day" value from an "hour" value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lattice::{Unit, UnitRange};

/// Component values keyed by unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Components {
    values: [Option<i32>; 8],
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Year, month and day, era left for the calendar to infer
    pub fn date(year: i32, month: i32, day: i32) -> Self {
        Self::new()
            .with(Unit::Year, year)
            .with(Unit::Month, month)
            .with(Unit::Day, day)
    }

    /// Date plus hour, minute and second
    pub fn date_time(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self::date(year, month, day)
            .with(Unit::Hour, hour)
            .with(Unit::Minute, minute)
            .with(Unit::Second, second)
    }

    pub fn get(&self, unit: Unit) -> Option<i32> {
        self.values[unit.index()]
    }

    pub fn set(&mut self, unit: Unit, value: Option<i32>) {
        self.values[unit.index()] = value;
    }

    pub fn with(mut self, unit: Unit, value: i32) -> Self {
        self.set(unit, Some(value));
        self
    }

    pub fn without(mut self, unit: Unit) -> Self {
        self.set(unit, None);
        self
    }

    pub fn era(&self) -> Option<i32> {
        self.get(Unit::Era)
    }

    pub fn year(&self) -> Option<i32> {
        self.get(Unit::Year)
    }

    pub fn month(&self) -> Option<i32> {
        self.get(Unit::Month)
    }

    pub fn day(&self) -> Option<i32> {
        self.get(Unit::Day)
    }

    pub fn hour(&self) -> Option<i32> {
        self.get(Unit::Hour)
    }

    pub fn minute(&self) -> Option<i32> {
        self.get(Unit::Minute)
    }

    pub fn second(&self) -> Option<i32> {
        self.get(Unit::Second)
    }

    pub fn nanosecond(&self) -> Option<i32> {
        self.get(Unit::Nanosecond)
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Units that carry a value, coarsest first
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        Unit::ALL
            .into_iter()
            .rev()
            .filter(|unit| self.get(*unit).is_some())
    }

    /// Keep only the units inside `range`
    pub fn restricted_to(&self, range: UnitRange) -> Self {
        let mut restricted = Self::new();
        for unit in range.units() {
            restricted.set(unit, self.get(unit));
        }
        restricted
    }

    /// Units of `range` without a value, coarsest first
    pub fn missing(&self, range: UnitRange) -> Vec<Unit> {
        range.units().filter(|unit| self.get(*unit).is_none()).collect()
    }

    /// Units with a value that lie outside `range`, coarsest first
    pub fn extra(&self, range: UnitRange) -> Vec<Unit> {
        self.units().filter(|unit| !range.contains(*unit)).collect()
    }

    /// True when exactly the units of `range` carry a value
    pub fn is_exactly(&self, range: UnitRange) -> bool {
        self.missing(range).is_empty() && self.extra(range).is_empty()
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for unit in self.units() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if let Some(value) = self.get(unit) {
                write!(f, "{unit}={value}")?;
            }
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}
