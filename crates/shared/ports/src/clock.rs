use chime_core::Instant;
use std::sync::Arc;

use crate::Region;

/// Port for time abstraction
///
/// A clock is a read-only capability: it reports "now" and the region in which
/// calendar values derived from it should be interpreted. Implementations:
/// - Real system time for production
/// - Offset, scaled or custom-start clocks for simulation
/// - Manually advanced time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Instant;

    /// Region that calendar values from this clock are expressed in
    fn region(&self) -> Region;

    /// Real seconds that elapse while this clock advances by one second
    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        1.0
    }

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn region(&self) -> Region {
        (**self).region()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        (**self).seconds_of_real_time_per_clock_second()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn region(&self) -> Region {
        (**self).region()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        (**self).seconds_of_real_time_per_clock_second()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
