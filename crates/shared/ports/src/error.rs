use thiserror::Error;

/// Errors raised while resolving a region from identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Unsupported calendar system: {0}")]
    UnsupportedCalendar(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Invalid locale identifier: {0:?}")]
    InvalidLocale(String),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
