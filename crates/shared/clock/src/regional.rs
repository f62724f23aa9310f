use chime_core::Instant;
use chime_ports::{Clock, Region};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Same time as another clock, expressed in a different region
#[derive(Debug, Clone)]
pub struct RegionalClock<C> {
    base: C,
    region: Region,
}

impl<C: Clock> RegionalClock<C> {
    pub fn new(base: C, region: Region) -> Self {
        Self { base, region }
    }

    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<C: Clock> Clock for RegionalClock<C> {
    fn now(&self) -> Instant {
        self.base.now()
    }

    fn region(&self) -> Region {
        self.region.clone()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        self.base.seconds_of_real_time_per_clock_second()
    }

    fn name(&self) -> &str {
        "RegionalClock"
    }
}

/// Supplier of the region currently preferred by the host
pub trait RegionSource: Send + Sync {
    fn current_region(&self) -> Region;
}

/// Host-updated region shared between clocks
///
/// The host (settings observer, configuration reload) calls [`update`]; every
/// clock reading from this snapshot sees the new region on its next call.
///
/// [`update`]: RegionSnapshot::update
#[derive(Debug, Clone)]
pub struct RegionSnapshot {
    current: Arc<RwLock<Region>>,
}

impl RegionSnapshot {
    pub fn new(region: Region) -> Self {
        Self {
            current: Arc::new(RwLock::new(region)),
        }
    }

    pub fn update(&self, region: Region) {
        let mut current = self.current.write();
        if *current != region {
            info!("Region changed from {} to {}", *current, region);
        }
        *current = region;
    }
}

impl RegionSource for RegionSnapshot {
    fn current_region(&self) -> Region {
        self.current.read().clone()
    }
}

/// Clock whose region follows a [`RegionSource`]
#[derive(Debug, Clone)]
pub struct AutoupdatingClock<C, S> {
    base: C,
    source: S,
}

impl<C: Clock, S: RegionSource> AutoupdatingClock<C, S> {
    pub fn new(base: C, source: S) -> Self {
        Self { base, source }
    }
}

impl<C: Clock, S: RegionSource> Clock for AutoupdatingClock<C, S> {
    fn now(&self) -> Instant {
        self.base.now()
    }

    fn region(&self) -> Region {
        self.source.current_region()
    }

    fn seconds_of_real_time_per_clock_second(&self) -> f64 {
        self.base.seconds_of_real_time_per_clock_second()
    }

    fn name(&self) -> &str {
        "AutoupdatingClock"
    }
}
