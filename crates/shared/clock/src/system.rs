use chime_calendar::GregorianEngine;
use chime_core::Instant;
use chime_ports::{Clock, Locale, Region};

/// Real system clock for production use
///
/// Reports the current wall-clock time in a fixed region.
#[derive(Debug, Clone)]
pub struct SystemClock {
    region: Region,
}

impl SystemClock {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// System time in the Gregorian calendar, UTC, POSIX locale
    pub fn utc() -> Self {
        Self::new(GregorianEngine::region(chrono_tz::UTC, Locale::posix()))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn region(&self) -> Region {
        self.region.clone()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::utc();
        let time1 = clock.now();
        thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        assert!(time2 > time1);
        let diff = time2 - time1;
        assert!(diff.as_seconds() >= 0.009);
    }

    #[test]
    fn test_system_clock_runs_at_real_time() {
        let clock = SystemClock::default();
        assert_eq!(clock.seconds_of_real_time_per_clock_second(), 1.0);
        assert_eq!(clock.region().time_zone(), "UTC");
    }
}
