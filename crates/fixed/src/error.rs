//! Fixed value errors

use chime_core::{Components, Unit};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixedError {
    #[error("Invalid components ({components}) in region {region}: {invalid:?} do not match any point in time")]
    InvalidComponents {
        components: Components,
        region: String,
        invalid: Vec<Unit>,
    },

    #[error("Invalid ordinal {ordinal}: {parent} has no such {unit}")]
    InvalidOrdinal {
        unit: Unit,
        ordinal: i64,
        parent: String,
    },

    #[error("{parent} has no representable {unit}")]
    NoChild { unit: Unit, parent: String },

    #[error("Unit {unit} is finer than the {granularity} granularity of this value")]
    UnitTooFine { unit: Unit, granularity: Unit },

    #[error("Unit {unit} is not finer than the {granularity} granularity of this value")]
    UnitNotFiner { unit: Unit, granularity: Unit },

    #[error("Values belong to different regions or granularities: {0} vs {1}")]
    Mismatch(String, String),

    #[error("Invalid stride: {0}")]
    InvalidStride(String),

    #[error("Moving {count} {unit} from {from} leaves the supported calendar range")]
    OutOfRange { unit: Unit, count: i64, from: String },
}

pub type Result<T> = std::result::Result<T, FixedError>;
