use chime_core::{Duration, Instant};
use chime_ports::{Clock, Region};
use parking_lot::RwLock;
use std::sync::Arc;

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can hand one copy to the code under
/// test and advance another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<RwLock<Instant>>,
    region: Region,
}

impl ManualClock {
    pub fn new(region: Region, start: Instant) -> Self {
        Self {
            current: Arc::new(RwLock::new(start)),
            region,
        }
    }

    /// Move time forward (or backward, for a negative duration)
    pub fn advance(&self, duration: Duration) {
        *self.current.write() += duration;
    }

    /// Jump to an explicit instant
    pub fn set(&self, instant: Instant) {
        *self.current.write() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.read()
    }

    fn region(&self) -> Region {
        self.region.clone()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
