//! Granularity lattice
//!
//! The eight standard calendar granularities form a total order, finest first:
//! nanosecond < second < minute < hour < day < month < year < era.
//! A component set is always a contiguous slice of that order.

mod unit;
mod unit_range;

pub use unit::{ParseUnitError, Unit};
pub use unit_range::UnitRange;
