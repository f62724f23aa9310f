use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Duration, Instant};

/// Half-open span of physical time `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstantRange {
    lower: Instant,
    upper: Instant,
}

impl InstantRange {
    /// Create a range; an upper bound below the lower bound collapses to empty
    pub fn new(lower: Instant, upper: Instant) -> Self {
        let upper = if upper < lower { lower } else { upper };
        Self { lower, upper }
    }

    pub fn starting_at(lower: Instant, duration: Duration) -> Self {
        Self::new(lower, lower + duration)
    }

    pub fn lower(&self) -> Instant {
        self.lower
    }

    pub fn upper(&self) -> Instant {
        self.upper
    }

    pub fn duration(&self) -> Duration {
        self.upper - self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.lower <= instant && instant < self.upper
    }

    pub fn contains_range(&self, other: &InstantRange) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    pub fn overlaps(&self, other: &InstantRange) -> bool {
        self.lower < other.upper && other.lower < self.upper
    }

    /// `lower + duration / 2`, never earlier than `lower`
    pub fn approximate_midpoint(&self) -> Instant {
        let midpoint = self.lower + self.duration() / 2.0;
        if midpoint < self.lower { self.lower } else { midpoint }
    }
}

impl fmt::Display for InstantRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: f64) -> Instant {
        Instant::from_unix_seconds(seconds)
    }

    #[test]
    fn test_half_open_containment() {
        let range = InstantRange::new(at(0.0), at(60.0));
        assert!(range.contains(at(0.0)));
        assert!(range.contains(at(59.999)));
        assert!(!range.contains(at(60.0)));
        assert!(range.contains_range(&InstantRange::new(at(0.0), at(60.0))));
        assert!(!range.contains_range(&InstantRange::new(at(30.0), at(61.0))));
    }

    #[test]
    fn test_overlap() {
        let a = InstantRange::new(at(0.0), at(10.0));
        assert!(a.overlaps(&InstantRange::new(at(9.0), at(20.0))));
        assert!(!a.overlaps(&InstantRange::new(at(10.0), at(20.0))));
    }

    #[test]
    fn test_inverted_bounds_collapse() {
        let range = InstantRange::new(at(10.0), at(5.0));
        assert!(range.is_empty());
        assert_eq!(range.approximate_midpoint(), at(10.0));
    }

    #[test]
    fn test_midpoint() {
        let range = InstantRange::starting_at(at(100.0), Duration::seconds(50.0));
        assert_eq!(range.approximate_midpoint(), at(125.0));
    }
}
