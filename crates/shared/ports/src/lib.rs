//! Chime Ports
//!
//! Port definitions (traits) for the chime calendar library.
//! These define the boundaries between calendar logic and the host platform:
//! the calendar engine that decomposes instants, and the clocks that produce them.

mod calendar;
mod clock;
mod error;
mod region;

pub use calendar::CalendarEngine;
pub use clock::Clock;
pub use error::{CalendarError, CalendarResult};
pub use region::{CalendarId, Locale, Region};
