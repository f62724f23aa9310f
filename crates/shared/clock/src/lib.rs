//! Chime Clock Infrastructure
//!
//! Time sources that report "now" together with the region calendar values
//! should be derived in.
//!
//! ## Clock Composition
//!
//! ```text
//! SystemClock / ManualClock (root)
//!     │
//!     ├── OffsetClock     (now + Δ)
//!     │
//!     ├── ScaledClock     (anchor + elapsed × factor)
//!     │       │
//!     │       └── RegionalClock (same now, other region)
//!     │
//!     └── AutoupdatingClock (region read from a RegionSource)
//!
//! CustomClock (fixed start, real elapsed time × rate)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use chime_clock::{ClockExt, SystemClock};
//! use chime_core::{Duration, Unit};
//!
//! let clock = SystemClock::utc().scaled(60.0);   // one minute per second
//! let ahead = clock.offset(Duration::hours(1));  // and an hour ahead
//! let hour = ahead.this(Unit::Hour);             // Fixed<Hour> containing now
//! let next = ahead.next(Unit::Minute)?;          // next whole minute
//! ```

mod ext;
mod manual;
mod offset;
mod regional;
mod scaled;
mod system;

pub use ext::ClockExt;
pub use manual::ManualClock;
pub use offset::OffsetClock;
pub use regional::{AutoupdatingClock, RegionSnapshot, RegionSource, RegionalClock};
pub use scaled::{CustomClock, ScaledClock};
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use chime_ports::Clock;
