//! Calendar arithmetic and rounding

use chime_core::{Direction, Instant, InstantRange, Stride, Unit};

use crate::error::{FixedError, Result};
use crate::Fixed;

impl Fixed {
    /// Move by `count` calendar units, keeping this value's granularity
    ///
    /// Month length and DST rules belong to the calendar engine: one month
    /// after January 31st is the last day of February.
    pub fn adding(&self, unit: Unit, count: i64) -> Result<Fixed> {
        if unit.is_finer_than(self.granularity()) {
            return Err(FixedError::UnitTooFine {
                unit,
                granularity: self.granularity(),
            });
        }
        if count == 0 {
            return Ok(self.clone());
        }
        let moved = self
            .engine()
            .add(self.first_instant(), unit, count)
            .ok_or_else(|| FixedError::OutOfRange {
                unit,
                count,
                from: self.to_string(),
            })?;
        Ok(self.derive(moved, self.granularity()))
    }

    /// Apply every part of `stride`, coarsest first
    pub fn adding_stride(&self, stride: &Stride) -> Result<Fixed> {
        stride
            .parts()
            .try_fold(self.clone(), |fixed, (unit, count)| fixed.adding(unit, count))
    }

    pub fn next(&self) -> Result<Fixed> {
        self.adding(self.granularity(), 1)
    }

    pub fn previous(&self) -> Result<Fixed> {
        self.adding(self.granularity(), -1)
    }

    /// Round to the nearest `unit` boundary, keeping this value's granularity
    ///
    /// A value already on a boundary is returned unchanged. Past the last era
    /// there is no boundary forward, so rounding falls back to backward.
    pub fn rounded(&self, unit: Unit, direction: Direction) -> Result<Fixed> {
        let parent = self.truncated(unit)?;
        if unit == self.granularity() {
            return Ok(self.clone());
        }
        let down = parent.first(self.granularity())?;
        if down == *self {
            return Ok(down);
        }
        let up = self.boundary_after(&parent);
        Ok(self.choose(down, up, direction))
    }

    /// Round to a multiple of `stride` counted from the start of the next
    /// coarser unit
    ///
    /// "13 minutes" aligns to :00, :13, :26, :39 and :52 of every hour;
    /// "2 hours 30 minutes" aligns to 00:00, 02:30, 05:00 ... of every day.
    /// The last multiple in a parent unit rounds up to the next parent's start.
    pub fn rounded_to_multiple(&self, stride: &Stride, direction: Direction) -> Result<Fixed> {
        if !stride.is_positive() {
            return Err(FixedError::InvalidStride(format!("{stride} is not a positive stride")));
        }
        let (Some(smallest), Some(largest)) = (stride.smallest_unit(), stride.largest_unit()) else {
            return Err(FixedError::InvalidStride("empty stride".to_string()));
        };
        if smallest.is_finer_than(self.granularity()) {
            return Err(FixedError::UnitTooFine {
                unit: smallest,
                granularity: self.granularity(),
            });
        }
        let Some(parent_unit) = largest.coarser() else {
            return Err(FixedError::InvalidStride(format!("{stride} has no coarser unit to align to")));
        };

        let parent = self.truncated(parent_unit)?;
        let origin = parent.first(self.granularity())?;
        let target = self.first_instant();
        let bounds = parent.range();
        let candidate = |k: i64| aligned(&origin, stride, k, bounds);

        // Largest multiple starting at or before this value: gallop, then bisect
        let (mut lo, mut down) = (0_i64, origin.clone());
        let mut hi = 1_i64;
        loop {
            match candidate(hi) {
                Some(c) if c.first_instant() <= target => {
                    lo = hi;
                    down = c;
                    if hi == i64::MAX {
                        break;
                    }
                    hi = hi.saturating_mul(2);
                }
                _ => break,
            }
        }
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            match candidate(mid) {
                Some(c) if c.first_instant() <= target => {
                    lo = mid;
                    down = c;
                }
                _ => hi = mid,
            }
        }

        if down == *self {
            return Ok(down);
        }
        let up = lo
            .checked_add(1)
            .and_then(candidate)
            .or_else(|| self.boundary_after(&parent));
        Ok(self.choose(down, up, direction))
    }

    /// First value of this granularity in the parent unit after `parent`
    fn boundary_after(&self, parent: &Fixed) -> Option<Fixed> {
        if parent.granularity() == Unit::Era && parent.era() == Some(self.engine().maximum_era()) {
            return None;
        }
        parent.next().ok()?.first(self.granularity()).ok()
    }

    fn choose(&self, down: Fixed, up: Option<Fixed>, direction: Direction) -> Fixed {
        let Some(up) = up else {
            return down;
        };
        match direction {
            Direction::Backward => down,
            Direction::Forward => up,
            Direction::Nearest => {
                let midpoint = self.approximate_midpoint();
                let to_down = distance(midpoint, down.first_instant());
                let to_up = distance(midpoint, up.first_instant());
                if to_up < to_down { up } else { down }
            }
        }
    }
}

fn aligned(origin: &Fixed, stride: &Stride, k: i64, bounds: InstantRange) -> Option<Fixed> {
    let candidate = origin.adding_stride(&stride.times(k)?).ok()?;
    bounds.contains(candidate.first_instant()).then_some(candidate)
}

fn distance(a: Instant, b: Instant) -> f64 {
    (a - b).abs().as_seconds()
}
