use chime_core::{Components, Direction, Instant, InstantRange, Unit, UnitRange};
use chime_ports::{CalendarEngine, Region};
use log::warn;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{FixedError, Result};

/// Nanosecond drift tolerated when verifying strict construction
///
/// Instants are stored as floating-point seconds, which cannot represent every
/// nanosecond of a modern date exactly.
pub const NANOSECOND_TOLERANCE: i64 = 24_000;

/// A calendar value anchored to one span of physical time
///
/// Holds the region it was derived in, a representative instant, and the
/// decomposition of that instant restricted to its component set (every unit
/// from its granularity up to the era).
#[derive(Clone)]
pub struct Fixed {
    region: Region,
    instant: Instant,
    granularity: Unit,
    components: Components,
}

impl Fixed {
    /// Project `instant` onto the calendar at `granularity`
    ///
    /// Always succeeds: the calendar engine guarantees the decomposition.
    pub fn from_instant(region: Region, instant: Instant, granularity: Unit) -> Self {
        let components = region
            .engine()
            .decompose(instant, UnitRange::down_to(granularity));
        Self {
            region,
            instant,
            granularity,
            components,
        }
    }

    /// Strict construction from explicit components
    ///
    /// `components` must hold exactly the units from `granularity` up to the
    /// year; the era may be left out for calendars where it is not significant.
    /// Ambiguous wall-clock times resolve to the occurrence nearest to now.
    pub fn from_components(region: Region, granularity: Unit, components: Components) -> Result<Self> {
        Self::from_components_near(region, granularity, components, Instant::now())
    }

    /// Strict construction, disambiguating relative to `near` instead of now
    pub fn from_components_near(
        region: Region,
        granularity: Unit,
        components: Components,
        near: Instant,
    ) -> Result<Self> {
        let units = UnitRange::down_to(granularity);
        let engine = region.engine();

        let mut invalid: Vec<Unit> = components
            .missing(units)
            .into_iter()
            .filter(|unit| *unit != Unit::Era || engine.is_era_significant())
            .collect();
        invalid.extend(components.extra(units));
        if !invalid.is_empty() {
            return Err(rejected(&region, components, invalid));
        }

        let Some(instant) = engine.find_nearest_match(near, &components, Direction::Nearest) else {
            let invalid = first_impossible(engine, &components);
            return Err(rejected(&region, components, invalid));
        };

        let fixed = Self::from_instant(region, instant, granularity);
        let mismatched: Vec<Unit> = components
            .units()
            .filter(|unit| !reproduces(*unit, components.get(*unit), fixed.components.get(*unit)))
            .collect();
        if !mismatched.is_empty() {
            return Err(rejected(&fixed.region, components, mismatched));
        }
        Ok(fixed)
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The instant this value was derived from
    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn granularity(&self) -> Unit {
        self.granularity
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn component(&self, unit: Unit) -> Option<i32> {
        self.components.get(unit)
    }

    pub fn era(&self) -> Option<i32> {
        self.components.era()
    }

    pub fn year(&self) -> Option<i32> {
        self.components.year()
    }

    pub fn month(&self) -> Option<i32> {
        self.components.month()
    }

    pub fn day(&self) -> Option<i32> {
        self.components.day()
    }

    pub fn hour(&self) -> Option<i32> {
        self.components.hour()
    }

    pub fn minute(&self) -> Option<i32> {
        self.components.minute()
    }

    pub fn second(&self) -> Option<i32> {
        self.components.second()
    }

    pub fn nanosecond(&self) -> Option<i32> {
        self.components.nanosecond()
    }

    /// Span of physical time this value covers
    pub fn range(&self) -> InstantRange {
        self.region.engine().range_of(self.granularity, self.instant)
    }

    pub fn first_instant(&self) -> Instant {
        self.range().lower()
    }

    /// Exclusive end of the range
    pub fn upper_bound(&self) -> Instant {
        self.range().upper()
    }

    pub fn approximate_midpoint(&self) -> Instant {
        self.range().approximate_midpoint()
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.range().contains(instant)
    }

    /// Day of week (1 = Sunday) for values of day granularity or finer
    pub fn weekday(&self) -> Option<u32> {
        (self.granularity <= Unit::Day)
            .then(|| self.region.engine().weekday(self.approximate_midpoint()))
    }

    /// The value at the same granularity that starts this value in `region`
    pub fn in_region(&self, region: Region) -> Fixed {
        Fixed::from_instant(region, self.first_instant(), self.granularity)
    }

    /// Same region and granularity, so ordering is defined
    pub fn is_comparable(&self, other: &Fixed) -> bool {
        self.granularity == other.granularity && self.region == other.region
    }

    pub(crate) fn derive(&self, instant: Instant, granularity: Unit) -> Fixed {
        Fixed::from_instant(self.region.clone(), instant, granularity)
    }

    pub(crate) fn engine(&self) -> &dyn CalendarEngine {
        self.region.engine()
    }
}

fn reproduces(unit: Unit, expected: Option<i32>, actual: Option<i32>) -> bool {
    match (unit, expected, actual) {
        (Unit::Nanosecond, Some(expected), Some(actual)) => {
            (i64::from(expected) - i64::from(actual)).abs() <= NANOSECOND_TOLERANCE
        }
        _ => expected == actual,
    }
}

/// The coarsest unit whose addition makes the components impossible
fn first_impossible(engine: &dyn CalendarEngine, components: &Components) -> Vec<Unit> {
    let mut prefix = Components::new();
    for unit in components.units() {
        prefix.set(unit, components.get(unit));
        if engine.compose(&prefix).is_none() {
            return vec![unit];
        }
    }
    components.units().collect()
}

fn rejected(region: &Region, components: Components, invalid: Vec<Unit>) -> FixedError {
    warn!("Rejected components ({components}) in {region}: {invalid:?}");
    FixedError::InvalidComponents {
        components,
        region: region.to_string(),
        invalid,
    }
}

impl PartialEq for Fixed {
    fn eq(&self, other: &Self) -> bool {
        self.granularity == other.granularity
            && self.components == other.components
            && self.region == other.region
    }
}

impl Eq for Fixed {}

impl Hash for Fixed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.region.hash(state);
        self.granularity.hash(state);
        self.components.hash(state);
    }
}

/// Defined only between values of the same region and granularity
impl PartialOrd for Fixed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_comparable(other) {
            return None;
        }
        if self.components == other.components {
            return Some(Ordering::Equal);
        }
        Some(self.first_instant().cmp(&other.first_instant()))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.components;
        let Some(year) = c.year() else {
            return write!(f, "era {}", c.era().unwrap_or_default());
        };
        write!(f, "{year:04}")?;
        if let Some(month) = c.month() {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = c.day() {
            write!(f, "-{day:02}")?;
        }
        if let Some(hour) = c.hour() {
            write!(f, "T{hour:02}")?;
        }
        if let Some(minute) = c.minute() {
            write!(f, ":{minute:02}")?;
        }
        if let Some(second) = c.second() {
            write!(f, ":{second:02}")?;
        }
        if let Some(nanosecond) = c.nanosecond() {
            write!(f, ".{nanosecond:09}")?;
        }
        match c.era() {
            Some(era) if era != self.engine().maximum_era() => write!(f, " (era {era})"),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed<{}>({}, {})", self.granularity, self, self.region)
    }
}
