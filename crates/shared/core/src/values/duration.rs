use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Signed, real-valued difference between two instants, in seconds
///
/// Independent of any calendar: a `Duration` of one day is always 86 400
/// seconds, regardless of DST transitions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Duration {
    seconds: f64,
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0.0 };

    pub const fn seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn nanoseconds(nanoseconds: i64) -> Self {
        Self::seconds(nanoseconds as f64 / 1e9)
    }

    pub fn milliseconds(milliseconds: i64) -> Self {
        Self::seconds(milliseconds as f64 / 1e3)
    }

    pub fn minutes(minutes: i64) -> Self {
        Self::seconds(minutes as f64 * 60.0)
    }

    pub fn hours(hours: i64) -> Self {
        Self::seconds(hours as f64 * 3_600.0)
    }

    pub fn as_seconds(self) -> f64 {
        self.seconds
    }

    pub fn abs(self) -> Self {
        Self::seconds(self.seconds.abs())
    }

    pub fn is_positive(self) -> bool {
        self.seconds > 0.0
    }

    /// Convert to a standard library duration for sleeping
    ///
    /// Returns `None` for negative, zero or non-finite durations.
    pub fn to_std(self) -> Option<std::time::Duration> {
        if self.seconds.is_finite() && self.seconds > 0.0 {
            std::time::Duration::try_from_secs_f64(self.seconds).ok()
        } else {
            None
        }
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self::seconds(value.as_secs_f64())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::seconds(self.seconds + rhs.seconds)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.seconds += rhs.seconds;
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::seconds(self.seconds - rhs.seconds)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        self.seconds -= rhs.seconds;
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: f64) -> Duration {
        Duration::seconds(self.seconds * rhs)
    }
}

impl Div<f64> for Duration {
    type Output = Duration;

    fn div(self, rhs: f64) -> Duration {
        Duration::seconds(self.seconds / rhs)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::seconds(-self.seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}
