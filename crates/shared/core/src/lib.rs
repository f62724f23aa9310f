//! Chime Core
//!
//! Pure value types shared by every chime crate: points in physical time,
//! the granularity lattice and calendar component sets.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod components;
pub mod lattice;
pub mod stride;
pub mod values;

pub use components::Components;
pub use lattice::{Unit, UnitRange};
pub use stride::Stride;
pub use values::{Direction, Duration, Epoch, Instant, InstantRange};
