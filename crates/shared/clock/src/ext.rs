use chime_core::{Duration, Instant, Unit};
use chime_fixed::{Fixed, Result};
use chime_ports::{Clock, Region};

use crate::{AutoupdatingClock, CustomClock, OffsetClock, RegionSource, RegionalClock, ScaledClock};

/// Combinators and calendar helpers available on every clock
pub trait ClockExt: Clock + Sized {
    /// This clock, `offset` ahead
    fn offset(self, offset: Duration) -> OffsetClock<Self> {
        OffsetClock::new(self, offset)
    }

    /// This clock, running `factor` times as fast from now on
    ///
    /// # Panics
    /// If `factor` is not a positive, finite number.
    fn scaled(self, factor: f64) -> ScaledClock<Self> {
        ScaledClock::new(self, factor)
    }

    /// A clock in this clock's region starting at `start` and advancing at
    /// `rate` clock seconds per real second
    ///
    /// # Panics
    /// If `rate` is not a positive, finite number.
    fn starting_at(&self, start: Instant, rate: f64) -> CustomClock {
        CustomClock::new(self.region(), start, rate)
    }

    /// Same time, different region
    fn in_region(self, region: Region) -> RegionalClock<Self> {
        RegionalClock::new(self, region)
    }

    /// Same time, region read from `source` on every call
    fn autoupdating<S: RegionSource>(self, source: S) -> AutoupdatingClock<Self, S> {
        AutoupdatingClock::new(self, source)
    }

    /// The `unit` containing now
    fn this(&self, unit: Unit) -> Fixed {
        Fixed::from_instant(self.region(), self.now(), unit)
    }

    /// The `unit` after the one containing now
    fn next(&self, unit: Unit) -> Result<Fixed> {
        self.this(unit).next()
    }

    /// The `unit` before the one containing now
    fn previous(&self, unit: Unit) -> Result<Fixed> {
        self.this(unit).previous()
    }

    fn this_second(&self) -> Fixed {
        self.this(Unit::Second)
    }

    fn next_second(&self) -> Result<Fixed> {
        self.next(Unit::Second)
    }

    fn today(&self) -> Fixed {
        self.this(Unit::Day)
    }
}

impl<C: Clock> ClockExt for C {}
