//! Multi-unit steps such as "2 hours 30 minutes"

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lattice::Unit;

/// A signed count per calendar unit
///
/// Applied coarsest part first, so "1 month 1 day" from January 31st lands on
/// March 1st (February 29th, then one more day) rather than February 1st.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stride {
    counts: [i64; 8],
}

impl Stride {
    pub fn of(unit: Unit, count: i64) -> Self {
        Self::default().and(unit, count)
    }

    pub fn and(mut self, unit: Unit, count: i64) -> Self {
        self.counts[unit.index()] = count;
        self
    }

    pub fn seconds(count: i64) -> Self {
        Self::of(Unit::Second, count)
    }

    pub fn minutes(count: i64) -> Self {
        Self::of(Unit::Minute, count)
    }

    pub fn hours(count: i64) -> Self {
        Self::of(Unit::Hour, count)
    }

    pub fn days(count: i64) -> Self {
        Self::of(Unit::Day, count)
    }

    pub fn months(count: i64) -> Self {
        Self::of(Unit::Month, count)
    }

    pub fn years(count: i64) -> Self {
        Self::of(Unit::Year, count)
    }

    pub fn count(&self, unit: Unit) -> i64 {
        self.counts[unit.index()]
    }

    /// Non-zero parts, coarsest first
    pub fn parts(&self) -> impl Iterator<Item = (Unit, i64)> + '_ {
        Unit::ALL
            .into_iter()
            .rev()
            .map(|unit| (unit, self.count(unit)))
            .filter(|(_, count)| *count != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }

    /// True when every non-zero part moves forward in time
    pub fn is_positive(&self) -> bool {
        !self.is_empty() && self.counts.iter().all(|count| *count >= 0)
    }

    pub fn smallest_unit(&self) -> Option<Unit> {
        self.parts().last().map(|(unit, _)| unit)
    }

    pub fn largest_unit(&self) -> Option<Unit> {
        self.parts().next().map(|(unit, _)| unit)
    }

    /// Every part multiplied by `factor`, `None` on overflow
    pub fn times(&self, factor: i64) -> Option<Stride> {
        let mut scaled = Stride::default();
        for (i, count) in self.counts.iter().enumerate() {
            scaled.counts[i] = count.checked_mul(factor)?;
        }
        Some(scaled)
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }
        let parts: Vec<String> = self
            .parts()
            .map(|(unit, count)| format!("{count} {unit}"))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
