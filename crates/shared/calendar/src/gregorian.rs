use chime_core::{Components, Direction, Duration, Instant, InstantRange, Unit, UnitRange};
use chime_ports::{CalendarEngine, CalendarError, CalendarId, CalendarResult, Locale, Region};
use chrono::{
    DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::sync::Arc;

/// Before the common era
const BCE: i32 = 0;
/// Common era
const CE: i32 = 1;

// Instants are clamped to this band of years, well inside chrono's own
// limits, so applying a time zone offset can never overflow.
const MIN_YEAR: i32 = -99_999;
const MAX_YEAR: i32 = 99_999;

/// Proleptic Gregorian calendar in one IANA time zone
///
/// Eras follow the usual BCE (0) / CE (1) split, with years counted from 1 in
/// both. Wall-clock times that fall into a DST gap are read with the offset in
/// effect before the gap; times in a DST fold resolve to their earliest
/// occurrence unless a caller asks otherwise.
#[derive(Debug, Clone)]
pub struct GregorianEngine {
    calendar: CalendarId,
    tz: Tz,
}

impl GregorianEngine {
    /// Create an engine for `calendar`, which must be Gregorian or ISO 8601
    pub fn new(calendar: CalendarId, tz: Tz) -> CalendarResult<Self> {
        if calendar == CalendarId::gregorian() || calendar == CalendarId::iso8601() {
            Ok(Self { calendar, tz })
        } else {
            Err(CalendarError::UnsupportedCalendar(calendar.to_string()))
        }
    }

    pub fn gregorian(tz: Tz) -> Self {
        Self {
            calendar: CalendarId::gregorian(),
            tz,
        }
    }

    /// Region backed by a fresh Gregorian engine
    pub fn region(tz: Tz, locale: Locale) -> Region {
        Region::new(Arc::new(Self::gregorian(tz)), locale)
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    fn lower_bound() -> Instant {
        Instant::from(year_start_utc(MIN_YEAR))
    }

    fn upper_bound() -> Instant {
        Instant::from(year_start_utc(MAX_YEAR + 1))
    }

    fn clamp(instant: Instant) -> Instant {
        instant.clamp(
            Self::lower_bound(),
            Self::upper_bound() - Duration::seconds(1.0),
        )
    }

    fn local(&self, instant: Instant) -> NaiveDateTime {
        Self::clamp(instant)
            .to_utc()
            .with_timezone(&self.tz)
            .naive_local()
    }

    fn offset_at(&self, instant: Instant) -> i32 {
        let utc = Self::clamp(instant).to_utc().naive_utc();
        self.tz.offset_from_utc_datetime(&utc).fix().local_minus_utc()
    }

    /// Map a wall-clock time to an instant
    fn resolve(&self, local: NaiveDateTime, preferred_offset: Option<i32>) -> Instant {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Instant::from(dt),
            LocalResult::Ambiguous(earliest, latest) => {
                if preferred_offset == Some(latest.offset().fix().local_minus_utc()) {
                    Instant::from(latest)
                } else {
                    Instant::from(earliest)
                }
            }
            LocalResult::None => {
                let before = local.checked_sub_days(Days::new(1)).unwrap_or(local);
                let offset = self.tz.offset_from_utc_datetime(&before).fix().local_minus_utc();
                let utc = local
                    .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
                    .unwrap_or(local);
                Instant::from(utc.and_utc())
            }
        }
    }

    /// Every instant that reads as `local` on the wall clock, earliest first
    fn occurrences(&self, local: NaiveDateTime) -> Vec<Instant> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => vec![Instant::from(dt)],
            LocalResult::Ambiguous(earliest, latest) => {
                vec![Instant::from(earliest), Instant::from(latest)]
            }
            LocalResult::None => vec![self.resolve(local, None)],
        }
    }

    fn midnight(&self, date: NaiveDate) -> Instant {
        self.resolve(date.and_time(NaiveTime::default()), None)
    }

    fn era_start(&self) -> Instant {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .map(|date| self.midnight(date))
            .unwrap_or_else(Self::lower_bound)
    }

    fn add_months(&self, instant: Instant, count: i64) -> Option<Instant> {
        let local = self.local(instant);
        let months = Months::new(u32::try_from(count.unsigned_abs()).ok()?);
        let shifted = if count > 0 {
            local.checked_add_months(months)
        } else {
            local.checked_sub_months(months)
        }?;
        Some(self.resolve(shifted, Some(self.offset_at(instant))))
    }

    fn add_days(&self, instant: Instant, count: i64) -> Option<Instant> {
        let local = self.local(instant);
        let days = Days::new(count.unsigned_abs());
        let shifted = if count > 0 {
            local.checked_add_days(days)
        } else {
            local.checked_sub_days(days)
        }?;
        Some(self.resolve(shifted, Some(self.offset_at(instant))))
    }
}

impl CalendarEngine for GregorianEngine {
    fn calendar(&self) -> CalendarId {
        self.calendar.clone()
    }

    fn time_zone(&self) -> &str {
        self.tz.name()
    }

    fn decompose(&self, instant: Instant, units: UnitRange) -> Components {
        let local = self.local(instant);
        let (is_ce, year_of_era) = local.year_ce();
        let mut components = Components::new();
        for unit in units.units() {
            let value = match unit {
                Unit::Era => {
                    if is_ce {
                        CE
                    } else {
                        BCE
                    }
                }
                Unit::Year => year_of_era as i32,
                Unit::Month => local.month() as i32,
                Unit::Day => local.day() as i32,
                Unit::Hour => local.hour() as i32,
                Unit::Minute => local.minute() as i32,
                Unit::Second => local.second() as i32,
                // Leap seconds report nanoseconds past 1e9; fold them into the second.
                Unit::Nanosecond => local.nanosecond().min(999_999_999) as i32,
            };
            components.set(unit, Some(value));
        }
        components
    }

    fn compose(&self, components: &Components) -> Option<Instant> {
        if components.year().is_none() {
            let finer = components.units().any(|unit| unit != Unit::Era);
            return match components.era() {
                Some(CE) if !finer => Some(self.era_start()),
                Some(BCE) if !finer => Some(Self::lower_bound()),
                _ => None,
            };
        }
        let local = local_from(components)?;
        Some(self.resolve(local, None))
    }

    fn find_nearest_match(
        &self,
        approximate: Instant,
        components: &Components,
        direction: Direction,
    ) -> Option<Instant> {
        if components.year().is_none() {
            return self.compose(components);
        }
        let local = local_from(components)?;
        pick(approximate, self.occurrences(local), direction)
    }

    fn range_of(&self, unit: Unit, instant: Instant) -> InstantRange {
        let instant = Self::clamp(instant);
        match unit {
            Unit::Era => {
                let ce = self.era_start();
                if instant >= ce {
                    InstantRange::new(ce, Self::upper_bound())
                } else {
                    InstantRange::new(Self::lower_bound(), ce)
                }
            }
            Unit::Year | Unit::Month | Unit::Day => {
                let date = self.local(instant).date();
                let (start, next) = match unit {
                    Unit::Year => {
                        let start = date.with_ordinal(1).unwrap_or(date);
                        (start, start.checked_add_months(Months::new(12)))
                    }
                    Unit::Month => {
                        let start = date.with_day(1).unwrap_or(date);
                        (start, start.checked_add_months(Months::new(1)))
                    }
                    _ => (date, date.checked_add_days(Days::new(1))),
                };
                let upper = next
                    .map(|date| self.midnight(date))
                    .unwrap_or_else(Self::upper_bound);
                InstantRange::new(self.midnight(start), upper)
            }
            Unit::Hour | Unit::Minute | Unit::Second => {
                let local = self.local(instant);
                let into_unit = match unit {
                    Unit::Hour => local.minute() * 60 + local.second(),
                    Unit::Minute => local.second(),
                    _ => 0,
                };
                let whole = instant.to_utc().timestamp() - i64::from(into_unit);
                let length = unit.fixed_seconds().unwrap_or(1.0);
                InstantRange::starting_at(
                    Instant::from_unix_seconds(whole as f64),
                    Duration::seconds(length),
                )
            }
            Unit::Nanosecond => InstantRange::starting_at(instant, Duration::nanoseconds(1)),
        }
    }

    fn add(&self, instant: Instant, unit: Unit, count: i64) -> Option<Instant> {
        if count == 0 {
            return Some(instant);
        }
        let result = match unit {
            Unit::Era => {
                let components = self.decompose(instant, UnitRange::down_to(Unit::Nanosecond));
                let era = i64::from(components.era()?) + count;
                if !(i64::from(BCE)..=i64::from(CE)).contains(&era) {
                    return None;
                }
                let local = local_from(&components.with(Unit::Era, era as i32))?;
                self.resolve(local, Some(self.offset_at(instant)))
            }
            Unit::Year => self.add_months(instant, count.checked_mul(12)?)?,
            Unit::Month => self.add_months(instant, count)?,
            Unit::Day => self.add_days(instant, count)?,
            Unit::Hour | Unit::Minute | Unit::Second | Unit::Nanosecond => {
                let step = unit.fixed_seconds()?;
                instant + Duration::seconds(count as f64 * step)
            }
        };
        (Self::lower_bound() <= result && result < Self::upper_bound()).then_some(result)
    }

    fn era_count(&self) -> usize {
        2
    }

    fn maximum_era(&self) -> i32 {
        CE
    }

    fn weekday(&self, instant: Instant) -> u32 {
        self.local(instant).weekday().number_from_sunday()
    }
}

fn year_start_utc(year: i32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Wall-clock time described by `components`, finer units defaulting to their minimum
fn local_from(components: &Components) -> Option<NaiveDateTime> {
    let year_of_era = components.year()?;
    if year_of_era < 1 {
        return None;
    }
    let year = match components.era().unwrap_or(CE) {
        CE => year_of_era,
        BCE => 1 - year_of_era,
        _ => return None,
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    let field = |unit: Unit, default: i32| u32::try_from(components.get(unit).unwrap_or(default)).ok();
    let nanosecond = field(Unit::Nanosecond, 0).filter(|ns| *ns < 1_000_000_000)?;

    NaiveDate::from_ymd_opt(year, field(Unit::Month, 1)?, field(Unit::Day, 1)?)?.and_hms_nano_opt(
        field(Unit::Hour, 0)?,
        field(Unit::Minute, 0)?,
        field(Unit::Second, 0)?,
        nanosecond,
    )
}

fn pick(approximate: Instant, occurrences: Vec<Instant>, direction: Direction) -> Option<Instant> {
    match direction {
        Direction::Forward => occurrences
            .iter()
            .copied()
            .filter(|candidate| *candidate >= approximate)
            .min()
            .or_else(|| occurrences.iter().copied().max()),
        Direction::Backward => occurrences
            .iter()
            .copied()
            .filter(|candidate| *candidate <= approximate)
            .max()
            .or_else(|| occurrences.iter().copied().min()),
        Direction::Nearest => occurrences.into_iter().min_by(|a, b| {
            let da = (*a - approximate).abs();
            let db = (*b - approximate).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> GregorianEngine {
        GregorianEngine::gregorian(chrono_tz::UTC)
    }

    fn new_york() -> GregorianEngine {
        GregorianEngine::gregorian(chrono_tz::America::New_York)
    }

    fn at(seconds: f64) -> Instant {
        Instant::from_unix_seconds(seconds)
    }

    // 2020-02-29T00:00:00Z
    const LEAP_DAY: f64 = 1_582_934_400.0;

    #[test]
    fn test_rejects_unknown_calendar() {
        let result = GregorianEngine::new(CalendarId::new("hebrew"), chrono_tz::UTC);
        assert_eq!(
            result.unwrap_err(),
            CalendarError::UnsupportedCalendar("hebrew".to_string())
        );
        assert!(GregorianEngine::new(CalendarId::iso8601(), chrono_tz::UTC).is_ok());
    }

    #[test]
    fn test_decompose_day() {
        let components = utc().decompose(at(LEAP_DAY + 3_600.0), UnitRange::down_to(Unit::Day));
        assert_eq!(components, Components::date(2020, 2, 29).with(Unit::Era, CE));
    }

    #[test]
    fn test_decompose_before_common_era() {
        let start = utc().compose(&Components::date(44, 3, 15).with(Unit::Era, BCE)).unwrap();
        let components = utc().decompose(start, UnitRange::down_to(Unit::Year));
        assert_eq!(components.era(), Some(BCE));
        assert_eq!(components.year(), Some(44));
    }

    #[test]
    fn test_compose_rejects_impossible_dates() {
        assert!(utc().compose(&Components::date(2020, 2, 30)).is_none());
        assert!(utc().compose(&Components::date(2019, 2, 29)).is_none());
        assert!(utc().compose(&Components::date(0, 1, 1)).is_none());
        assert!(utc().compose(&Components::date(2020, 13, 1)).is_none());
    }

    #[test]
    fn test_compose_defaults_finer_units() {
        let month = Components::new().with(Unit::Year, 2020).with(Unit::Month, 2);
        assert_eq!(utc().compose(&month), Some(at(1_580_515_200.0)));
    }

    #[test]
    fn test_month_range_in_leap_year() {
        let range = utc().range_of(Unit::Month, at(LEAP_DAY));
        assert_eq!(range.lower(), at(1_580_515_200.0));
        assert_eq!(range.upper(), at(1_583_020_800.0));
        assert_eq!(range.duration(), Duration::seconds(29.0 * 86_400.0));
    }

    #[test]
    fn test_hour_range() {
        let range = utc().range_of(Unit::Hour, at(LEAP_DAY + 5_432.25));
        assert_eq!(range.lower(), at(LEAP_DAY + 3_600.0));
        assert_eq!(range.duration(), Duration::seconds(3_600.0));
    }

    #[test]
    fn test_add_month_clamps_to_month_end() {
        // 2020-01-31T00:00:00Z
        let january_31 = at(1_580_428_800.0);
        assert_eq!(utc().add(january_31, Unit::Month, 1), Some(at(LEAP_DAY)));
    }

    #[test]
    fn test_add_past_last_era_fails() {
        assert!(utc().add(at(LEAP_DAY), Unit::Era, 1).is_none());
        assert!(utc().add(at(LEAP_DAY), Unit::Era, -1).is_some());
    }

    #[test]
    fn test_spring_forward_day_is_short() {
        // 2024-03-10T12:00:00Z, during the day New York springs forward
        let range = new_york().range_of(Unit::Day, at(1_710_072_000.0));
        assert_eq!(range.duration(), Duration::seconds(23.0 * 3_600.0));
    }

    #[test]
    fn test_gap_time_reads_forward() {
        let components = Components::date_time(2024, 3, 10, 2, 30, 0);
        let instant = new_york().compose(&components).unwrap();
        let back = new_york().decompose(instant, UnitRange::down_to(Unit::Hour));
        assert_eq!(back.hour(), Some(3));
    }

    #[test]
    fn test_fold_disambiguation() {
        let engine = new_york();
        let components = Components::date_time(2024, 11, 3, 1, 30, 0);
        // 2024-11-03T05:30:00Z (EDT) and 2024-11-03T06:30:00Z (EST)
        let first = at(1_730_611_800.0);
        let second = at(1_730_615_400.0);

        let late = at(1_730_620_000.0);
        assert_eq!(engine.find_nearest_match(late, &components, Direction::Nearest), Some(second));
        assert_eq!(engine.find_nearest_match(late, &components, Direction::Backward), Some(second));
        let early = at(1_730_600_000.0);
        assert_eq!(engine.find_nearest_match(early, &components, Direction::Forward), Some(first));
        assert_eq!(engine.compose(&components), Some(first));
    }

    #[test]
    fn test_weekday() {
        // 2020-02-29 was a Saturday
        assert_eq!(utc().weekday(at(LEAP_DAY)), 7);
    }
}
