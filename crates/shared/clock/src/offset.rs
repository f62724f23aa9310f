use chime_core::{Duration, Instant};
use chime_ports::{Clock, Region};

/// Clock running a fixed offset ahead of (or behind) another clock
#[derive(Debug, Clone)]
pub struct OffsetClock<C> {
    base: C,
    offset: Duration,
}

impl<C: Clock> OffsetClock<C> {
    /// `offset` may be negative
    pub fn new(base: C, offset: Duration) -> Self {
        Self { base, offset }
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<C: Clock> Clock for OffsetClock<C> {
    fn now(&self) -> Instant {
        self.base.now() + self.offset
    }

    fn region(&self) -> Region {
        self.base.region()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        self.base.seconds_of_real_time_per_clock_second()
    }

    fn name(&self) -> &str {
        "OffsetClock"
    }
}
