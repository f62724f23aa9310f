use chime_core::{Components, Direction, Instant, InstantRange, Unit, UnitRange};
use std::fmt;

use crate::CalendarId;

/// Port for the host calendar engine
///
/// Everything that depends on leap rules, eras, month lengths or time zone
/// transitions lives behind this trait. One engine instance is bound to one
/// calendar system and one time zone.
pub trait CalendarEngine: Send + Sync + fmt::Debug {
    /// Calendar system this engine implements
    fn calendar(&self) -> CalendarId;

    /// Time zone identifier (e.g. "Europe/Paris")
    fn time_zone(&self) -> &str;

    /// Split `instant` into the components of `units`
    fn decompose(&self, instant: Instant, units: UnitRange) -> Components;

    /// First instant whose decomposition starts with `components`
    ///
    /// Unspecified finer units default to their minimum. Returns `None` for
    /// impossible combinations such as February 30th.
    fn compose(&self, components: &Components) -> Option<Instant>;

    /// Instant matching `components`, choosing by `direction` relative to
    /// `approximate` when the wall-clock time occurs more than once
    fn find_nearest_match(
        &self,
        approximate: Instant,
        components: &Components,
        direction: Direction,
    ) -> Option<Instant>;

    /// Span of the `unit` that contains `instant`
    fn range_of(&self, unit: Unit, instant: Instant) -> InstantRange;

    /// `instant` moved by `count` calendar units, `None` if the result leaves
    /// the supported range
    fn add(&self, instant: Instant, unit: Unit, count: i64) -> Option<Instant>;

    /// Number of eras the calendar defines
    fn era_count(&self) -> usize;

    /// Largest era value; nothing follows it
    fn maximum_era(&self) -> i32;

    /// Whether an era must always be given to identify a year
    fn is_era_significant(&self) -> bool {
        self.era_count() > 2
    }

    /// Day of week at `instant`, 1 = Sunday
    fn weekday(&self, instant: Instant) -> u32;
}
