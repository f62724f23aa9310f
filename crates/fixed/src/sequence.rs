//! Lazy sequences of fixed values

use chime_core::{Instant, Stride, Unit};

use crate::error::{FixedError, Result};
use crate::Fixed;

/// Values at whole multiples of a stride from a start value
///
/// The n-th value is `start + n × stride`, computed from the start every time,
/// so month-end clamping never accumulates: from January 31st, monthly values
/// are February 29th, March 31st, April 30th.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    start: Fixed,
    stride: Stride,
    index: i64,
    end: Option<Instant>,
    exhausted: bool,
}

impl FixedSequence {
    fn new(start: Fixed, stride: Stride) -> Self {
        Self {
            start,
            stride,
            index: 0,
            end: None,
            exhausted: false,
        }
    }

    /// Stop before the first value that starts at or past `end`
    ///
    /// For a backward stride, stop before the first value starting before `end`.
    pub fn until(mut self, end: Instant) -> Self {
        self.end = Some(end);
        self
    }

    pub fn stride(&self) -> &Stride {
        &self.stride
    }

    fn past_end(&self, value: &Fixed) -> bool {
        match self.end {
            Some(end) if self.stride.is_positive() => value.first_instant() >= end,
            Some(end) => value.first_instant() < end,
            None => false,
        }
    }
}

impl Iterator for FixedSequence {
    type Item = Fixed;

    fn next(&mut self) -> Option<Fixed> {
        if self.exhausted {
            return None;
        }
        let value = self
            .stride
            .times(self.index)
            .and_then(|offset| self.start.adding_stride(&offset).ok())
            .filter(|value| !self.past_end(value));
        match (value, self.index.checked_add(1)) {
            (Some(value), Some(index)) => {
                self.index = index;
                Some(value)
            }
            _ => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl Fixed {
    /// This value followed by every whole multiple of `stride` after it
    ///
    /// All non-zero parts of the stride must share a sign, and none may be
    /// finer than this value's granularity.
    pub fn sequence(&self, stride: Stride) -> Result<FixedSequence> {
        let backward = stride.times(-1).is_some_and(|negated| negated.is_positive());
        if !stride.is_positive() && !backward {
            return Err(FixedError::InvalidStride(format!(
                "{stride} must be non-empty and move in one direction"
            )));
        }
        if let Some(unit) = stride.smallest_unit().filter(|unit| unit.is_finer_than(self.granularity())) {
            return Err(FixedError::UnitTooFine {
                unit,
                granularity: self.granularity(),
            });
        }
        Ok(FixedSequence::new(self.clone(), stride))
    }

    /// Every child of granularity `unit`, in order
    pub fn children(&self, unit: Unit) -> Result<FixedSequence> {
        Ok(self
            .first(unit)?
            .sequence(Stride::of(unit, 1))?
            .until(self.upper_bound()))
    }

    /// This value and its successors up to and including `end`
    pub fn through(&self, end: &Fixed) -> Result<FixedSequence> {
        if !self.is_comparable(end) {
            return Err(FixedError::Mismatch(format!("{self:?}"), format!("{end:?}")));
        }
        Ok(self
            .sequence(Stride::of(self.granularity(), 1))?
            .until(end.upper_bound()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_calendar::GregorianEngine;
    use chime_core::Components;
    use chime_ports::{Locale, Region};

    fn utc() -> Region {
        GregorianEngine::region(chrono_tz::UTC, Locale::posix())
    }

    fn day(y: i32, m: i32, d: i32) -> Fixed {
        Fixed::from_components(utc(), Unit::Day, Components::date(y, m, d)).unwrap()
    }

    #[test]
    fn test_monthly_sequence_does_not_drift() {
        let days: Vec<i32> = day(2020, 1, 31)
            .sequence(Stride::months(1))
            .unwrap()
            .take(4)
            .filter_map(|d| d.day())
            .collect();
        assert_eq!(days, vec![31, 29, 31, 30]);
    }

    #[test]
    fn test_children_cover_parent() {
        let feb = day(2020, 2, 10).fixed_month().unwrap();
        let days: Vec<Fixed> = feb.children(Unit::Day).unwrap().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&day(2020, 2, 1)));
        assert_eq!(days.last(), Some(&day(2020, 2, 29)));
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_through_is_inclusive() {
        let span: Vec<Fixed> = day(2020, 2, 27).through(&day(2020, 3, 1)).unwrap().collect();
        assert_eq!(span, vec![day(2020, 2, 27), day(2020, 2, 28), day(2020, 2, 29), day(2020, 3, 1)]);
        assert_eq!(day(2020, 3, 1).through(&day(2020, 2, 1)).unwrap().count(), 0);
    }

    #[test]
    fn test_through_rejects_other_granularity() {
        let month = day(2020, 2, 1).fixed_month().unwrap();
        assert!(matches!(
            day(2020, 2, 1).through(&month),
            Err(FixedError::Mismatch(_, _))
        ));
    }

    #[test]
    fn test_backward_sequence_until() {
        let days: Vec<i32> = day(2020, 3, 2)
            .sequence(Stride::days(-1))
            .unwrap()
            .until(day(2020, 2, 28).first_instant())
            .filter_map(|d| d.day())
            .collect();
        assert_eq!(days, vec![2, 1, 29, 28]);
    }

    #[test]
    fn test_sequence_rejects_mixed_or_fine_strides() {
        let start = day(2020, 2, 1);
        assert!(matches!(
            start.sequence(Stride::months(1).and(Unit::Day, -1)),
            Err(FixedError::InvalidStride(_))
        ));
        assert!(matches!(start.sequence(Stride::default()), Err(FixedError::InvalidStride(_))));
        assert!(matches!(
            start.sequence(Stride::hours(12)),
            Err(FixedError::UnitTooFine { .. })
        ));
    }
}
