mod duration;
mod epoch;
mod instant;
mod range;

pub use duration::Duration;
pub use epoch::Epoch;
pub use instant::Instant;
pub use range::InstantRange;

use serde::{Deserialize, Serialize};

/// Which way to look when choosing between two candidate values
///
/// Used both for rounding a value onto a boundary and for disambiguating a
/// calendar search (e.g. a wall-clock time that occurs twice during a DST fold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards later instants
    Forward,
    /// Towards earlier instants
    Backward,
    /// Whichever candidate is closer, ties broken towards `Backward`
    #[default]
    Nearest,
}
