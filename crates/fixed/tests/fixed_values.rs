//! Integration tests for fixed values against the Gregorian engine

use chime_calendar::{EngineCache, GregorianEngine};
use chime_core::{
    Components, Direction, Instant, InstantRange, Stride, Unit, UnitRange,
};
use chime_fixed::{Fixed, FixedError};
use chime_ports::{CalendarEngine, CalendarId, Locale, Region};
use std::sync::Arc;

fn utc() -> Region {
    GregorianEngine::region(chrono_tz::UTC, Locale::posix())
}

fn year(region: &Region, y: i32) -> Fixed {
    Fixed::from_components(region.clone(), Unit::Year, Components::new().with(Unit::Year, y)).unwrap()
}

fn month(region: &Region, y: i32, m: i32) -> Fixed {
    let components = Components::new().with(Unit::Year, y).with(Unit::Month, m);
    Fixed::from_components(region.clone(), Unit::Month, components).unwrap()
}

fn day(region: &Region, y: i32, m: i32, d: i32) -> Fixed {
    Fixed::from_components(region.clone(), Unit::Day, Components::date(y, m, d)).unwrap()
}

#[test]
fn test_last_day_of_leap_february() {
    let _ = env_logger::try_init();
    let region = utc();
    assert_eq!(month(&region, 2020, 2).last_day().unwrap(), day(&region, 2020, 2, 29));
}

#[test]
fn test_last_month_of_year() {
    let region = utc();
    assert_eq!(year(&region, 2020).last_month().unwrap(), month(&region, 2020, 12));
    assert_eq!(year(&region, 2020).first_month().unwrap(), month(&region, 2020, 1));
}

#[test]
fn test_february_thirtieth_is_rejected() {
    let _ = env_logger::try_init();
    let err = Fixed::from_components(utc(), Unit::Day, Components::date(2020, 2, 30)).unwrap_err();
    match err {
        FixedError::InvalidComponents { invalid, components, .. } => {
            assert_eq!(invalid, vec![Unit::Day]);
            assert_eq!(components.day(), Some(30));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_children_stay_inside_parent() {
    let cache = EngineCache::new();
    for zone in ["UTC", "America/New_York", "Australia/Lord_Howe", "Asia/Kathmandu"] {
        let region = cache.region("gregorian", zone, "en_US_POSIX").unwrap();
        for parent in [year(&region, 2024), month(&region, 2024, 3), month(&region, 2024, 11)] {
            let child = parent.granularity().finer().unwrap();
            let range = parent.range();
            let first = parent.first(child).unwrap();
            let last = parent.last(child).unwrap();
            assert!(range.contains_range(&first.range()), "{parent:?} first {first:?}");
            assert!(range.contains_range(&last.range()), "{parent:?} last {last:?}");
            assert!(!range.contains(last.upper_bound()), "{parent:?} last is not last");
            assert_eq!(first.first_instant(), range.lower());

            let children: Vec<Fixed> = parent.children(child).unwrap().collect();
            assert_eq!(children.first(), Some(&first));
            assert_eq!(children.last(), Some(&last));
            assert!(children.iter().all(|c| range.contains_range(&c.range())));
        }
    }
}

#[test]
fn test_days_of_dst_month() {
    let new_york = GregorianEngine::region(chrono_tz::America::New_York, Locale::posix());
    let march = month(&new_york, 2024, 3);
    let days: Vec<Fixed> = march.children(Unit::Day).unwrap().collect();
    assert_eq!(days.len(), 31);
    let short = &days[9];
    assert_eq!(short.day(), Some(10));
    assert_eq!(short.range().duration().as_seconds(), 23.0 * 3600.0);
    assert_eq!(short.children(Unit::Hour).unwrap().count(), 23);
}

#[test]
fn test_nth_bounds() {
    let region = utc();
    let feb = month(&region, 2021, 2);
    assert_eq!(feb.nth(Unit::Day, 1).unwrap(), feb.first_day().unwrap());
    assert_eq!(feb.nth(Unit::Day, 28).unwrap(), feb.last_day().unwrap());
    for ordinal in [-3, 0, 29, 31, 400] {
        assert!(
            matches!(feb.nth(Unit::Day, ordinal), Err(FixedError::InvalidOrdinal { .. })),
            "ordinal {ordinal} should be rejected"
        );
    }
}

#[test]
fn test_truncation_is_idempotent_and_contains() {
    let region = utc();
    let instant = Instant::from_unix_seconds(1_715_934_615.25);
    let second = Fixed::from_instant(region, instant, Unit::Second);
    for unit in UnitRange::down_to(Unit::Second).units() {
        let coarse = second.truncated(unit).unwrap();
        assert_eq!(coarse.truncated(unit).unwrap(), coarse);
        assert!(coarse.range().contains_range(&second.range()));
        assert_eq!(coarse.components(), &second.components().restricted_to(UnitRange::down_to(unit)));
    }
}

#[test]
fn test_rounding_is_stable_and_bracketing() {
    let region = utc();
    let value = Fixed::from_instant(region, Instant::from_unix_seconds(1_715_934_615.0), Unit::Second);
    for unit in [Unit::Minute, Unit::Hour, Unit::Day, Unit::Month, Unit::Year] {
        let down = value.rounded(unit, Direction::Backward).unwrap();
        let up = value.rounded(unit, Direction::Forward).unwrap();
        assert!(down <= value && value <= up, "{unit}: {down:?} {value:?} {up:?}");
        for direction in [Direction::Backward, Direction::Forward, Direction::Nearest] {
            let rounded = value.rounded(unit, direction).unwrap();
            assert_eq!(rounded.rounded(unit, direction).unwrap(), rounded, "{unit} {direction:?}");
            assert_eq!(rounded.granularity(), Unit::Second);
        }
    }
}

#[test]
fn test_rounding_to_quarter_hours() {
    let region = utc();
    // 2024-05-17T08:30:15Z
    let value = Fixed::from_instant(region, Instant::from_unix_seconds(1_715_934_615.0), Unit::Minute);
    let rounded = value.rounded_to_multiple(&Stride::minutes(15), Direction::Nearest).unwrap();
    assert_eq!((rounded.hour(), rounded.minute()), (Some(8), Some(30)));
    let forward = value.next().unwrap().rounded_to_multiple(&Stride::minutes(15), Direction::Forward).unwrap();
    assert_eq!((forward.hour(), forward.minute()), (Some(8), Some(45)));
}

#[test]
fn test_ordering_requires_same_region() {
    let utc = utc();
    let paris = GregorianEngine::region(chrono_tz::Europe::Paris, Locale::posix());
    let a = day(&utc, 2020, 2, 1);
    let b = day(&paris, 2020, 2, 1);
    assert_eq!(a.partial_cmp(&b), None);
    assert!(a < day(&utc, 2020, 2, 2));
    assert!(matches!(a.through(&b), Err(FixedError::Mismatch(_, _))));
}

#[test]
fn test_equal_regions_from_distinct_engines() {
    let a = day(&GregorianEngine::region(chrono_tz::UTC, Locale::posix()), 2020, 2, 29);
    let b = day(&EngineCache::new().region("gregorian", "UTC", "en_US_POSIX").unwrap(), 2020, 2, 29);
    assert_eq!(a, b);
}

/// Gregorian rules with more eras than the common two
#[derive(Debug)]
struct ManyEras(GregorianEngine);

impl CalendarEngine for ManyEras {
    fn calendar(&self) -> CalendarId {
        CalendarId::new("many-eras")
    }

    fn time_zone(&self) -> &str {
        self.0.time_zone()
    }

    fn decompose(&self, instant: Instant, units: UnitRange) -> Components {
        self.0.decompose(instant, units)
    }

    fn compose(&self, components: &Components) -> Option<Instant> {
        self.0.compose(components)
    }

    fn find_nearest_match(&self, approximate: Instant, components: &Components, direction: Direction) -> Option<Instant> {
        self.0.find_nearest_match(approximate, components, direction)
    }

    fn range_of(&self, unit: Unit, instant: Instant) -> InstantRange {
        self.0.range_of(unit, instant)
    }

    fn add(&self, instant: Instant, unit: Unit, count: i64) -> Option<Instant> {
        self.0.add(instant, unit, count)
    }

    fn era_count(&self) -> usize {
        5
    }

    fn maximum_era(&self) -> i32 {
        self.0.maximum_era()
    }

    fn weekday(&self, instant: Instant) -> u32 {
        self.0.weekday(instant)
    }
}

#[test]
fn test_era_required_when_significant() {
    let region = Region::new(Arc::new(ManyEras(GregorianEngine::gregorian(chrono_tz::UTC))), Locale::posix());
    let err = Fixed::from_components(region.clone(), Unit::Day, Components::date(2020, 2, 29)).unwrap_err();
    assert!(matches!(err, FixedError::InvalidComponents { ref invalid, .. } if invalid == &vec![Unit::Era]));

    let with_era = Components::date(2020, 2, 29).with(Unit::Era, 1);
    assert!(Fixed::from_components(region, Unit::Day, with_era).is_ok());
}
