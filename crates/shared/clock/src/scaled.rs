use chime_core::{Duration, Instant};
use chime_ports::{Clock, Region};

/// Clock that runs `factor` times as fast as another clock
///
/// Anchored at the base clock's time when created: from then on
/// `now = anchor + (base.now() - anchor) × factor`. Scaling a scaled clock
/// multiplies the factors.
#[derive(Debug, Clone)]
pub struct ScaledClock<C> {
    base: C,
    anchor: Instant,
    factor: f64,
}

impl<C: Clock> ScaledClock<C> {
    /// # Panics
    /// If `factor` is not a positive, finite number.
    pub fn new(base: C, factor: f64) -> Self {
        assert_rate(factor);
        let anchor = base.now();
        Self { base, anchor, factor }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<C: Clock> Clock for ScaledClock<C> {
    fn now(&self) -> Instant {
        self.anchor + (self.base.now() - self.anchor) * self.factor
    }

    fn region(&self) -> Region {
        self.base.region()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        self.base.seconds_of_real_time_per_clock_second() / self.factor
    }

    fn name(&self) -> &str {
        "ScaledClock"
    }
}

/// Clock starting at an arbitrary instant and advancing at `rate` clock
/// seconds per real second
///
/// Elapsed time comes from the host's monotonic clock, so the clock never
/// jumps when the system time is adjusted.
#[derive(Debug, Clone)]
pub struct CustomClock {
    region: Region,
    start: Instant,
    rate: f64,
    started: std::time::Instant,
}

impl CustomClock {
    /// # Panics
    /// If `rate` is not a positive, finite number.
    pub fn new(region: Region, start: Instant, rate: f64) -> Self {
        assert_rate(rate);
        Self {
            region,
            start,
            rate,
            started: std::time::Instant::now(),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Clock for CustomClock {
    fn now(&self) -> Instant {
        self.start + Duration::from(self.started.elapsed()) * self.rate
    }

    fn region(&self) -> Region {
        self.region.clone()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        1.0 / self.rate
    }

    fn name(&self) -> &str {
        "CustomClock"
    }
}

fn assert_rate(rate: f64) {
    assert!(
        rate.is_finite() && rate > 0.0,
        "clock rate must be positive and finite, got {rate}"
    );
}
