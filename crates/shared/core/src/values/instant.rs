use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::{Duration, Epoch};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A point in continuous physical time
///
/// Stored as real-valued seconds relative to an [`Epoch`]. Ordering, equality
/// and subtraction always convert both operands to the Unix epoch first, so two
/// instants expressed against different epochs compare correctly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Instant {
    seconds: f64,
    #[serde(default)]
    epoch: Epoch,
}

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant::new(0.0, Epoch::Unix);

    pub const fn new(seconds: f64, epoch: Epoch) -> Self {
        Self { seconds, epoch }
    }

    pub const fn from_unix_seconds(seconds: f64) -> Self {
        Self::new(seconds, Epoch::Unix)
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Seconds since the Unix epoch (`-0.0` normalised to `0.0`)
    pub fn unix_seconds(&self) -> f64 {
        self.seconds + self.epoch.offset_from_unix() + 0.0
    }

    /// Seconds since an arbitrary epoch
    pub fn seconds_since(&self, epoch: Epoch) -> f64 {
        if epoch == self.epoch {
            self.seconds
        } else {
            self.unix_seconds() - epoch.offset_from_unix()
        }
    }

    /// The same point in time, re-expressed against another epoch
    pub fn in_epoch(&self, epoch: Epoch) -> Instant {
        Instant::new(self.seconds_since(epoch), epoch)
    }

    pub fn is_finite(&self) -> bool {
        self.seconds.is_finite()
    }

    /// Convert to a UTC timestamp, clamping to chrono's representable range
    pub fn to_utc(&self) -> DateTime<Utc> {
        let seconds = self.unix_seconds();
        if seconds.is_nan() {
            return DateTime::<Utc>::default();
        }
        let min = DateTime::<Utc>::MIN_UTC.timestamp() as f64;
        let max = DateTime::<Utc>::MAX_UTC.timestamp() as f64;
        let clamped = seconds.clamp(min, max);

        let whole = clamped.floor();
        let mut secs = whole as i64;
        let mut nanos = ((clamped - whole) * 1e9).round() as i64;
        if nanos >= NANOS_PER_SECOND {
            secs += 1;
            nanos -= NANOS_PER_SECOND;
        }

        DateTime::from_timestamp(secs, nanos as u32).unwrap_or(if secs < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }

    fn total_cmp(&self, other: &Instant) -> Ordering {
        self.unix_seconds().total_cmp(&other.unix_seconds())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(value: DateTime<Tz>) -> Self {
        let seconds = value.timestamp() as f64 + f64::from(value.timestamp_subsec_nanos()) / 1e9;
        Instant::from_unix_seconds(seconds)
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unix_seconds().to_bits().hash(state);
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant::new(self.seconds + rhs.as_seconds(), self.epoch)
    }
}

impl AddAssign<Duration> for Instant {
    fn add_assign(&mut self, rhs: Duration) {
        self.seconds += rhs.as_seconds();
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant::new(self.seconds - rhs.as_seconds(), self.epoch)
    }
}

impl SubAssign<Duration> for Instant {
    fn sub_assign(&mut self, rhs: Duration) {
        self.seconds -= rhs.as_seconds();
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        Duration::seconds(self.seconds - rhs.seconds_since(self.epoch))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_independent_ordering() {
        let unix = Instant::from_unix_seconds(978_307_200.0);
        let reference = Instant::new(0.0, Epoch::Reference2001);
        assert_eq!(unix, reference);
        assert!(Instant::new(1.0, Epoch::Reference2001) > unix);
        assert!(Instant::new(-1.0, Epoch::Y2k) < Instant::new(0.0, Epoch::Y2k));
    }

    #[test]
    fn test_epoch_independent_subtraction() {
        let a = Instant::new(10.0, Epoch::Reference2001);
        let b = Instant::from_unix_seconds(978_307_200.0);
        assert_eq!(a - b, Duration::seconds(10.0));
        assert_eq!(b - a, Duration::seconds(-10.0));
    }

    #[test]
    fn test_epoch_conversion() {
        let y2k = Instant::new(0.0, Epoch::Y2k);
        assert_eq!(y2k.seconds_since(Epoch::Unix), 946_684_800.0);
        assert_eq!(y2k.in_epoch(Epoch::Reference2001).seconds_since(Epoch::Reference2001), -31_622_400.0);
    }

    #[test]
    fn test_utc_round_trip() {
        let instant = Instant::from_unix_seconds(1_582_934_400.5);
        let utc = instant.to_utc();
        assert_eq!(utc.timestamp(), 1_582_934_400);
        assert_eq!(utc.timestamp_subsec_nanos(), 500_000_000);
        assert_eq!(Instant::from(utc), instant);
    }

    #[test]
    fn test_negative_fraction_floors() {
        let utc = Instant::from_unix_seconds(-0.25).to_utc();
        assert_eq!(utc.timestamp(), -1);
        assert_eq!(utc.timestamp_subsec_nanos(), 750_000_000);
    }

    #[test]
    fn test_now_tracks_chrono_utc() {
        let before = Instant::from(Utc::now());
        let now = Instant::now();
        let after = Instant::from(Utc::now());
        assert_eq!(now.epoch(), Epoch::Unix);
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_display_is_rfc3339() {
        assert_eq!(Instant::UNIX_EPOCH.to_string(), "1970-01-01T00:00:00+00:00");
    }
}
