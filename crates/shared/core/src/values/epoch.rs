use serde::{Deserialize, Serialize};

/// Reference point an [`Instant`](super::Instant) counts seconds from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Epoch {
    /// 1970-01-01T00:00:00Z
    #[default]
    Unix,
    /// 2000-01-01T00:00:00Z
    Y2k,
    /// 2001-01-01T00:00:00Z
    Reference2001,
}

impl Epoch {
    /// Seconds between the Unix epoch and this epoch
    pub fn offset_from_unix(self) -> f64 {
        match self {
            Epoch::Unix => 0.0,
            Epoch::Y2k => 946_684_800.0,
            Epoch::Reference2001 => 978_307_200.0,
        }
    }
}
