//! Chime Fixed Values
//!
//! A [`Fixed`] is a calendar value anchored to exactly one span of physical
//! time at a given granularity: "March 2024", "2020-02-29", "10:15 today".
//!
//! ## Operations
//!
//! ```text
//! construction   from_instant (always succeeds) | from_components (strict)
//! truncation     fixed_year, fixed_day, ...      coarser, same instant
//! refinement     first, last, nth, numbered      finer, inside the range
//! arithmetic     adding, adding_stride           delegated to the calendar
//! rounding       rounded, rounded_to_multiple    forward / backward / nearest
//! sequences      sequence, children, through     lazy iterators
//! ```
//!
//! Granularity is carried at runtime as a [`Unit`](chime_core::Unit); operations
//! that make no sense for a granularity (adding hours to a year) fail with
//! [`FixedError`] instead of silently coarsening.

mod arithmetic;
mod error;
mod fixed;
mod navigate;
mod sequence;

pub use error::{FixedError, Result};
pub use fixed::{Fixed, NANOSECOND_TOLERANCE};
pub use sequence::FixedSequence;
