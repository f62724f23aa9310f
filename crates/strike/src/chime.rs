use chime_core::{Instant, Stride};
use chime_fixed::{Fixed, FixedError, FixedSequence, Result};
use std::fmt;

type Predicate = Box<dyn FnMut(&Fixed) -> bool + Send>;

/// Candidate values for a schedule, strictly increasing
///
/// A predicate chime tests candidates one stride at a time and may search
/// indefinitely when the predicate never holds; bound it with
/// [`until`](Chime::until).
pub struct Chime {
    candidates: Candidates,
    predicate: Option<Predicate>,
    end: Option<Instant>,
}

enum Candidates {
    Sequence(FixedSequence),
    Once(Option<Fixed>),
}

impl Chime {
    /// `start`, then every multiple of `stride` after it
    pub fn every(start: Fixed, stride: Stride) -> Result<Self> {
        if !stride.is_positive() {
            return Err(FixedError::InvalidStride(format!(
                "{stride} does not move forward in time"
            )));
        }
        Ok(Self::from_sequence(start.sequence(stride)?))
    }

    /// Every value from `start` on, one granularity step at a time, for which
    /// `predicate` holds
    pub fn when<P>(start: Fixed, predicate: P) -> Result<Self>
    where
        P: FnMut(&Fixed) -> bool + Send + 'static,
    {
        let stride = Stride::of(start.granularity(), 1);
        Self::matching(start, stride, predicate)
    }

    /// Values of a stride sequence for which `predicate` holds
    pub fn matching<P>(start: Fixed, stride: Stride, predicate: P) -> Result<Self>
    where
        P: FnMut(&Fixed) -> bool + Send + 'static,
    {
        let mut chime = Self::every(start, stride)?;
        chime.predicate = Some(Box::new(predicate));
        Ok(chime)
    }

    pub fn once(value: Fixed) -> Self {
        Self {
            candidates: Candidates::Once(Some(value)),
            predicate: None,
            end: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            candidates: Candidates::Once(None),
            predicate: None,
            end: None,
        }
    }

    /// Stop before the first candidate starting at or after `end`
    pub fn until(mut self, end: Instant) -> Self {
        self.end = Some(self.end.map_or(end, |current| current.min(end)));
        self
    }

    fn from_sequence(sequence: FixedSequence) -> Self {
        Self {
            candidates: Candidates::Sequence(sequence),
            predicate: None,
            end: None,
        }
    }

    fn finish(&mut self) {
        self.candidates = Candidates::Once(None);
    }
}

impl Iterator for Chime {
    type Item = Fixed;

    fn next(&mut self) -> Option<Fixed> {
        loop {
            let candidate = match &mut self.candidates {
                Candidates::Sequence(sequence) => sequence.next(),
                Candidates::Once(value) => value.take(),
            };
            let Some(candidate) = candidate else {
                self.finish();
                return None;
            };
            if self.end.is_some_and(|end| candidate.first_instant() >= end) {
                self.finish();
                return None;
            }
            if self.predicate.as_mut().is_none_or(|predicate| predicate(&candidate)) {
                return Some(candidate);
            }
        }
    }
}

impl fmt::Debug for Chime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match (&self.candidates, self.predicate.is_some()) {
            (Candidates::Sequence(sequence), false) => format!("every {}", sequence.stride()),
            (Candidates::Sequence(sequence), true) => format!("matching every {}", sequence.stride()),
            (Candidates::Once(Some(value)), _) => format!("once at {value}"),
            (Candidates::Once(None), _) => "exhausted".to_string(),
        };
        f.debug_struct("Chime")
            .field("kind", &kind)
            .field("end", &self.end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_calendar::GregorianEngine;
    use chime_core::{Components, Unit};
    use chime_ports::Locale;

    fn hour(h: i32) -> Fixed {
        let region = GregorianEngine::region(chrono_tz::UTC, Locale::posix());
        let components = Components::date_time(2024, 5, 17, h, 0, 0)
            .without(Unit::Minute)
            .without(Unit::Second);
        Fixed::from_components(region, Unit::Hour, components).unwrap()
    }

    #[test]
    fn test_every_is_unbounded_and_increasing() {
        let hours: Vec<i32> = Chime::every(hour(22), Stride::hours(1))
            .unwrap()
            .take(4)
            .filter_map(|h| h.hour())
            .collect();
        assert_eq!(hours, vec![22, 23, 0, 1]);
    }

    #[test]
    fn test_every_rejects_backward_stride() {
        assert!(Chime::every(hour(1), Stride::hours(-1)).is_err());
    }

    #[test]
    fn test_when_filters_candidates() {
        let even: Vec<i32> = Chime::when(hour(3), |h| h.hour().is_some_and(|h| h % 6 == 0))
            .unwrap()
            .take(3)
            .filter_map(|h| h.hour())
            .collect();
        assert_eq!(even, vec![6, 12, 18]);
    }

    #[test]
    fn test_until_bounds_a_predicate_that_never_holds() {
        let end = hour(3).adding(Unit::Day, 2).unwrap().first_instant();
        let mut never = Chime::when(hour(3), |_| false).unwrap().until(end);
        assert_eq!(never.next(), None);
        assert_eq!(never.next(), None);
    }

    #[test]
    fn test_once_and_empty() {
        let mut once = Chime::once(hour(5));
        assert_eq!(once.next(), Some(hour(5)));
        assert_eq!(once.next(), None);
        assert_eq!(Chime::empty().count(), 0);
    }
}
