use chime_clock::ClockExt;
use chime_core::{Direction, Duration, Instant, Stride, Unit};
use chime_fixed::Fixed;
use chime_ports::Clock;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CancellationToken, Chime, Result, StrikeConfig};

/// Longest uninterrupted sleep of a blocking schedule
const BLOCKING_SLICE: std::time::Duration = std::time::Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeState {
    /// Created, nothing requested yet
    Idle,
    /// Waiting for the next target
    Scheduled,
    /// Last request returned a value
    Struck,
    /// Cancelled or out of candidates; yields nothing further
    Completed,
}

/// A schedule yielding each candidate of a [`Chime`] when `clock` reaches it
pub struct Strike<C> {
    id: Uuid,
    clock: C,
    chime: Chime,
    token: CancellationToken,
    tolerance: Duration,
    state: StrikeState,
}

impl<C: Clock> Strike<C> {
    pub fn new(clock: C, chime: Chime) -> Self {
        Self {
            id: Uuid::new_v4(),
            clock,
            chime,
            token: CancellationToken::new(),
            tolerance: Duration::ZERO,
            state: StrikeState::Idle,
        }
    }

    /// Strike every `stride`, from `start` or from the next aligned multiple
    ///
    /// Without a start, "every 15 minutes" strikes at :00, :15, :30 and :45
    /// of each hour, and "every day" at each midnight.
    pub fn every(clock: C, stride: Stride, start: Option<Fixed>) -> Result<Self> {
        let start = match start {
            Some(start) => start,
            None => aligned_start(&clock, &stride)?,
        };
        let chime = Chime::every(start, stride)?;
        Ok(Self::new(clock, chime))
    }

    /// Strike at each `unit` for which `predicate` holds
    pub fn when<P>(clock: C, unit: Unit, predicate: P) -> Result<Self>
    where
        P: FnMut(&Fixed) -> bool + Send + 'static,
    {
        let chime = Chime::when(clock.this(unit), predicate)?;
        Ok(Self::new(clock, chime))
    }

    /// Strike once at `instant`, or never if it has already passed
    pub fn at(clock: C, instant: Instant) -> Self {
        let chime = if instant > clock.now() {
            Chime::once(Fixed::from_instant(clock.region(), instant, Unit::Nanosecond))
        } else {
            Chime::empty()
        };
        Self::new(clock, chime)
    }

    /// Accept wake-ups up to `tolerance` (clock time) before the target
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Observe an externally owned token instead of a private one
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn with_config(self, config: &StrikeConfig) -> Self {
        self.with_tolerance(config.tolerance())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> StrikeState {
        self.state
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the next target and return it
    ///
    /// Returns `None` once the schedule is cancelled or has no candidates left.
    pub async fn next(&mut self) -> Option<Fixed> {
        let target = self.schedule()?;
        loop {
            if self.token.is_cancelled() {
                return self.complete("cancelled while waiting");
            }
            let Some(wait) = self.real_time_until(&target) else {
                break;
            };
            debug!("Strike {} sleeping {:?} for {}", self.id, wait, target);
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = self.token.cancelled() => {}
            }
        }
        self.strike(target)
    }

    /// Blocking variant of [`next`](Strike::next) for synchronous callers
    ///
    /// Sleeps the current thread in short slices, observing cancellation
    /// between them.
    pub fn blocking_next(&mut self) -> Option<Fixed> {
        let target = self.schedule()?;
        loop {
            if self.token.is_cancelled() {
                return self.complete("cancelled while waiting");
            }
            let Some(wait) = self.real_time_until(&target) else {
                break;
            };
            std::thread::sleep(wait.min(BLOCKING_SLICE));
        }
        self.strike(target)
    }

    /// Iterator over the remaining strikes, blocking between them
    pub fn blocking(self) -> Blocking<C> {
        Blocking { strike: self }
    }

    /// Pick the next target that has not started yet
    fn schedule(&mut self) -> Option<Fixed> {
        if self.state == StrikeState::Completed {
            return None;
        }
        if self.token.is_cancelled() {
            return self.complete("cancelled");
        }
        let now = self.clock.now();
        let Some(target) = self.chime.find(|candidate| candidate.first_instant() > now) else {
            return self.complete("no candidates left");
        };
        self.state = StrikeState::Scheduled;
        Some(target)
    }

    /// Real time left before `target`, `None` once it is due
    fn real_time_until(&self, target: &Fixed) -> Option<std::time::Duration> {
        let remaining = target.first_instant() - self.clock.now();
        if remaining <= self.tolerance {
            return None;
        }
        (remaining * self.clock.seconds_of_real_time_per_clock_second()).to_std()
    }

    fn strike(&mut self, target: Fixed) -> Option<Fixed> {
        if self.token.is_cancelled() {
            return self.complete("cancelled before striking");
        }
        debug!("Strike {} struck {}", self.id, target);
        self.state = StrikeState::Struck;
        Some(target)
    }

    fn complete(&mut self, reason: &str) -> Option<Fixed> {
        if self.state != StrikeState::Completed {
            info!("Strike {} completed on {}: {}", self.id, self.clock.name(), reason);
            self.state = StrikeState::Completed;
        }
        None
    }
}

/// First multiple of `stride` starting at or after now
fn aligned_start<C: Clock>(clock: &C, stride: &Stride) -> Result<Fixed> {
    let unit = stride.smallest_unit().unwrap_or(Unit::Second);
    let current = clock.this(unit);
    match current.rounded_to_multiple(stride, Direction::Forward) {
        Ok(start) => Ok(start),
        // Era strides have nothing coarser to align to
        Err(_) if stride.is_positive() => Ok(current.next()?),
        Err(err) => Err(err.into()),
    }
}

/// Blocking iterator returned by [`Strike::blocking`]
pub struct Blocking<C> {
    strike: Strike<C>,
}

impl<C: Clock> Iterator for Blocking<C> {
    type Item = Fixed;

    fn next(&mut self) -> Option<Fixed> {
        self.strike.blocking_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_clock::{ManualClock, SystemClock};

    fn manual() -> ManualClock {
        // 2024-05-17T08:30:15Z
        ManualClock::new(SystemClock::utc().region(), Instant::from_unix_seconds(1_715_934_615.0))
    }

    #[test]
    fn test_default_start_is_aligned() {
        let mut strike = Strike::every(manual(), Stride::minutes(15), None).unwrap();
        let first = strike.schedule().unwrap();
        assert_eq!((first.hour(), first.minute()), (Some(8), Some(45)));
        assert_eq!(strike.state(), StrikeState::Scheduled);
    }

    #[test]
    fn test_past_candidates_are_skipped() {
        let clock = manual();
        let start = clock.previous(Unit::Hour).unwrap();
        let mut strike = Strike::every(clock.clone(), Stride::hours(1), Some(start)).unwrap();
        let first = strike.schedule().unwrap();
        assert!(first.first_instant() > clock.now());
        assert_eq!(first.hour(), Some(9));
    }

    #[test]
    fn test_at_past_instant_completes_immediately() {
        let clock = manual();
        let mut strike = Strike::at(clock.clone(), clock.now() - Duration::seconds(1.0));
        assert_eq!(strike.state(), StrikeState::Idle);
        assert_eq!(strike.blocking_next(), None);
        assert_eq!(strike.state(), StrikeState::Completed);
    }

    #[test]
    fn test_due_target_strikes_without_sleeping() {
        let clock = manual();
        let target = clock.now() + Duration::seconds(30.0);
        let mut strike = Strike::at(clock.clone(), target);
        // Time jumps past the target after scheduling
        let scheduled = strike.schedule().unwrap();
        clock.advance(Duration::minutes(1));
        assert_eq!(strike.real_time_until(&scheduled), None);
        assert_eq!(strike.strike(scheduled).map(|f| f.first_instant()), Some(target));
        assert_eq!(strike.state(), StrikeState::Struck);
    }

    #[test]
    fn test_tolerance_widens_the_window() {
        let clock = manual();
        let strike = Strike::at(clock.clone(), clock.now() + Duration::seconds(2.0))
            .with_tolerance(Duration::seconds(5.0));
        let target = Fixed::from_instant(clock.region(), clock.now() + Duration::seconds(2.0), Unit::Second);
        assert_eq!(strike.real_time_until(&target), None);
    }

    #[test]
    fn test_cancelled_strike_completes() {
        let mut strike = Strike::every(manual(), Stride::seconds(1), None).unwrap();
        strike.cancel();
        assert_eq!(strike.blocking_next(), None);
        assert_eq!(strike.state(), StrikeState::Completed);
        assert_eq!(strike.blocking_next(), None);
    }
}
