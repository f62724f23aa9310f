use serde::{Deserialize, Serialize};
use std::fmt;

use super::Unit;

/// Contiguous slice of the unit lattice, inclusive at both ends
///
/// This is the component set of a fixed value: every unit between `smallest`
/// and `largest` is represented, nothing outside of it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRange {
    smallest: Unit,
    largest: Unit,
}

impl UnitRange {
    /// # Panics
    /// If `smallest` is coarser than `largest`.
    pub fn new(smallest: Unit, largest: Unit) -> Self {
        assert!(
            smallest <= largest,
            "unit range lower bound {smallest} is coarser than upper bound {largest}"
        );
        Self { smallest, largest }
    }

    /// Component set from `smallest` up to and including the era
    pub fn down_to(smallest: Unit) -> Self {
        Self::new(smallest, Unit::Era)
    }

    pub fn smallest(&self) -> Unit {
        self.smallest
    }

    pub fn largest(&self) -> Unit {
        self.largest
    }

    pub fn contains(&self, unit: Unit) -> bool {
        self.smallest <= unit && unit <= self.largest
    }

    /// Units in this range, coarsest first
    pub fn units(&self) -> impl Iterator<Item = Unit> + use<> {
        let (smallest, largest) = (self.smallest.index(), self.largest.index());
        (smallest..=largest).rev().map(|i| Unit::ALL[i])
    }
}

impl fmt::Display for UnitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", self.smallest, self.largest)
    }
}
