//! Truncation and refinement

use chime_core::Unit;

use crate::error::{FixedError, Result};
use crate::Fixed;

impl Fixed {
    /// Coarser value containing this one
    ///
    /// Truncating to the current granularity returns an equal value.
    pub fn truncated(&self, unit: Unit) -> Result<Fixed> {
        if unit.is_finer_than(self.granularity()) {
            return Err(FixedError::UnitTooFine {
                unit,
                granularity: self.granularity(),
            });
        }
        Ok(self.derive(self.instant(), unit))
    }

    pub fn fixed_era(&self) -> Fixed {
        self.derive(self.instant(), Unit::Era)
    }

    pub fn fixed_year(&self) -> Result<Fixed> {
        self.truncated(Unit::Year)
    }

    pub fn fixed_month(&self) -> Result<Fixed> {
        self.truncated(Unit::Month)
    }

    pub fn fixed_day(&self) -> Result<Fixed> {
        self.truncated(Unit::Day)
    }

    pub fn fixed_hour(&self) -> Result<Fixed> {
        self.truncated(Unit::Hour)
    }

    pub fn fixed_minute(&self) -> Result<Fixed> {
        self.truncated(Unit::Minute)
    }

    pub fn fixed_second(&self) -> Result<Fixed> {
        self.truncated(Unit::Second)
    }

    /// Child of granularity `unit` starting where this value starts
    pub fn first(&self, unit: Unit) -> Result<Fixed> {
        self.require_finer(unit)?;
        Ok(self.derive(self.first_instant(), unit))
    }

    /// Child of granularity `unit` immediately before this value's upper bound
    ///
    /// Nanoseconds of present-day instants are coarser than one nanosecond
    /// apart, so the step back widens until the child lands inside this value.
    pub fn last(&self, unit: Unit) -> Result<Fixed> {
        self.require_finer(unit)?;
        let after = self.derive(self.upper_bound(), unit);
        let mut step: i64 = 1;
        loop {
            let child = after.adding(unit, -step)?;
            if self.is_parent_of(&child)? {
                return Ok(child);
            }
            if child.first_instant() < self.first_instant() {
                break;
            }
            match step.checked_mul(2) {
                Some(next) => step = next,
                None => break,
            }
        }
        Err(FixedError::NoChild {
            unit,
            parent: self.to_string(),
        })
    }

    /// Child at a 1-based position
    pub fn nth(&self, unit: Unit, ordinal: i64) -> Result<Fixed> {
        let first = self.first(unit)?;
        let invalid = || FixedError::InvalidOrdinal {
            unit,
            ordinal,
            parent: self.to_string(),
        };
        if ordinal < 1 {
            return Err(invalid());
        }
        let child = first.adding(unit, ordinal - 1).map_err(|_| invalid())?;
        if !self.is_parent_of(&child)? {
            return Err(invalid());
        }
        // A child indistinguishable from its predecessor is not a new position
        if ordinal > 1 {
            let before = child.adding(unit, -1).map_err(|_| invalid())?;
            if before.first_instant() >= child.first_instant() {
                return Err(invalid());
            }
        }
        Ok(child)
    }

    /// Whether `child` truncates back to this value
    fn is_parent_of(&self, child: &Fixed) -> Result<bool> {
        Ok(child.truncated(self.granularity())? == *self)
    }

    /// Child whose `unit` component equals `number`
    ///
    /// Labels need not match positions (hours start at 0, days at 1), so this
    /// guesses by position and walks one step at a time until the label
    /// matches. Returns `None` when no child carries the label.
    pub fn numbered(&self, unit: Unit, number: i32) -> Result<Option<Fixed>> {
        let first = self.first(unit)?;
        let last = self.last(unit)?;

        let mut guess = match self.nth(unit, i64::from(number) - 1) {
            Ok(child) => child,
            Err(FixedError::InvalidOrdinal { ordinal, .. }) if ordinal < 1 => first.clone(),
            Err(FixedError::InvalidOrdinal { .. }) => last.clone(),
            Err(err) => return Err(err),
        };

        let Some(label) = guess.component(unit) else {
            return Ok(None);
        };
        let step = if label < number { 1 } else { -1 };
        let mut previous = label;
        loop {
            let Some(label) = guess.component(unit) else {
                return Ok(None);
            };
            if label == number {
                return Ok(Some(guess));
            }
            // Overshot, or labels stopped moving towards the target
            if (label - number).signum() == step || (label - previous).signum() == -step {
                return Ok(None);
            }
            if (step > 0 && guess == last) || (step < 0 && guess == first) {
                return Ok(None);
            }
            previous = label;
            guess = guess.adding(unit, i64::from(step))?;
        }
    }

    pub fn first_month(&self) -> Result<Fixed> {
        self.first(Unit::Month)
    }

    pub fn last_month(&self) -> Result<Fixed> {
        self.last(Unit::Month)
    }

    pub fn first_day(&self) -> Result<Fixed> {
        self.first(Unit::Day)
    }

    pub fn last_day(&self) -> Result<Fixed> {
        self.last(Unit::Day)
    }

    pub fn first_hour(&self) -> Result<Fixed> {
        self.first(Unit::Hour)
    }

    pub fn last_hour(&self) -> Result<Fixed> {
        self.last(Unit::Hour)
    }

    fn require_finer(&self, unit: Unit) -> Result<()> {
        if unit.is_finer_than(self.granularity()) {
            Ok(())
        } else {
            Err(FixedError::UnitNotFiner {
                unit,
                granularity: self.granularity(),
            })
        }
    }
}
