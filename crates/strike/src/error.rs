//! Scheduler errors

use chime_fixed::FixedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrikeError {
    #[error("Cannot build schedule: {0}")]
    Fixed(#[from] FixedError),

    #[error("Strike task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StrikeError>;
