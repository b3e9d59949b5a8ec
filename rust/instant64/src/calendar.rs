//! Proleptic-Gregorian calendar math over tick counts.
//!
//! All functions are pure. Day counts are measured from 0001-01-01 (day 0).

use crate::{
    DAYS_PER_4_YEARS, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS, DAYS_PER_YEAR, Kind,
    TICKS_PER_DAY, TICKS_PER_MILLISECOND, TICKS_PER_SECOND, result::Result,
};

const DAYS_TO_MONTH_365: [i32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_TO_MONTH_366: [i32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Maps `0..=6` to `Sunday..=Saturday`, wrapping larger values.
    pub const fn from_index(index: u32) -> DayOfWeek {
        Self::ALL[(index % 7) as usize]
    }

    /// Number of days since the preceding Sunday.
    pub const fn num_days_from_sunday(self) -> u32 {
        self as u32
    }

    pub const fn succ(self) -> DayOfWeek {
        Self::from_index(self as u32 + 1)
    }
}

/// Broken-down calendar view of an instant.
///
/// This is the read-only projection handed to text formatters; it holds no
/// information beyond what can be recomputed from the instant's ticks and kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DateParts {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    fraction: i32,
    day_of_year: i32,
    day_of_week: DayOfWeek,
    kind: Kind,
}

impl DateParts {
    pub(crate) fn from_ticks(ticks: i64, kind: Kind) -> DateParts {
        let (year, month, day, day_of_year) = ticks_to_date_parts(ticks);
        DateParts {
            year,
            month,
            day,
            hour: hour_of(ticks),
            minute: minute_of(ticks),
            second: second_of(ticks),
            fraction: (ticks % TICKS_PER_SECOND) as i32,
            day_of_year,
            day_of_week: day_of_week(ticks),
            kind,
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> i32 {
        self.month
    }

    pub const fn day(&self) -> i32 {
        self.day
    }

    pub const fn hour(&self) -> i32 {
        self.hour
    }

    pub const fn minute(&self) -> i32 {
        self.minute
    }

    pub const fn second(&self) -> i32 {
        self.second
    }

    pub const fn millisecond(&self) -> i32 {
        self.fraction / TICKS_PER_MILLISECOND as i32
    }

    /// Sub-second part in ticks, `0..=9_999_999`.
    pub const fn fraction(&self) -> i32 {
        self.fraction
    }

    pub const fn day_of_year(&self) -> i32 {
        self.day_of_year
    }

    pub const fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }
}

/// Returns `true` if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> Result<bool> {
    crate::verify_range!(year, (1..=9999).contains(&year));
    Ok(is_leap_year_unchecked(year))
}

#[inline]
pub(crate) const fn is_leap_year_unchecked(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
const fn days_to_month(leap: bool) -> &'static [i32; 13] {
    if leap {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

pub fn days_in_month(year: i32, month: i32) -> Result<i32> {
    crate::verify_range!(month, (1..=12).contains(&month));
    crate::verify_range!(year, (1..=9999).contains(&year));
    Ok(days_in_month_unchecked(year, month))
}

/// [`days_in_month`] for a month already known to be in `1..=12`.
#[inline]
pub(crate) const fn days_in_month_unchecked(year: i32, month: i32) -> i32 {
    let days = days_to_month(is_leap_year_unchecked(year));
    days[month as usize] - days[(month - 1) as usize]
}

/// Days from 0001-01-01 to the given date.
pub fn date_parts_to_days(year: i32, month: i32, day: i32) -> Result<i64> {
    crate::verify_range!(year, (1..=9999).contains(&year));
    crate::verify_range!(month, (1..=12).contains(&month));
    let days = days_to_month(is_leap_year_unchecked(year));
    crate::verify_range!(
        day,
        day >= 1 && day <= days[month as usize] - days[(month - 1) as usize]
    );
    Ok(date_parts_to_days_unchecked(year, month, day))
}

/// [`date_parts_to_days`] without range checks. `month` must be in `1..=12`.
#[inline]
pub(crate) const fn date_parts_to_days_unchecked(year: i32, month: i32, day: i32) -> i64 {
    let days = days_to_month(is_leap_year_unchecked(year));
    let y = (year - 1) as i64;
    y * 365 + y / 4 - y / 100 + y / 400 + days[(month - 1) as usize] as i64 + day as i64 - 1
}

/// Ticks at midnight of the given date.
pub fn date_parts_to_ticks(year: i32, month: i32, day: i32) -> Result<i64> {
    Ok(date_parts_to_days(year, month, day)? * TICKS_PER_DAY)
}

/// Ticks elapsed since midnight at the given time of day.
pub fn time_parts_to_ticks(hour: i32, minute: i32, second: i32) -> Result<i64> {
    crate::verify_range!(hour, (0..=23).contains(&hour));
    crate::verify_range!(minute, (0..=59).contains(&minute));
    crate::verify_range!(second, (0..=59).contains(&second));
    let total_seconds = hour as i64 * 3600 + minute as i64 * 60 + second as i64;
    Ok(total_seconds * TICKS_PER_SECOND)
}

/// Like [`time_parts_to_ticks`], with a millisecond component.
pub fn time_parts_ms_to_ticks(hour: i32, minute: i32, second: i32, millisecond: i32) -> Result<i64> {
    crate::verify_range!(millisecond, (0..=999).contains(&millisecond));
    Ok(time_parts_to_ticks(hour, minute, second)? + millisecond as i64 * TICKS_PER_MILLISECOND)
}

/// Splits a tick count into `(year, month, day, day_of_year)`.
///
/// `ticks` must be non-negative; every tick count of a valid instant is.
pub fn ticks_to_date_parts(ticks: i64) -> (i32, i32, i32, i32) {
    debug_assert!(ticks >= 0);
    // n = day number within the whole range
    let mut n = (ticks / TICKS_PER_DAY) as i32;
    let y400 = n / DAYS_PER_400_YEARS;
    n -= y400 * DAYS_PER_400_YEARS;
    // the last century of a 400-year cycle is one day longer
    let y100 = (n / DAYS_PER_100_YEARS).min(3);
    n -= y100 * DAYS_PER_100_YEARS;
    let y4 = n / DAYS_PER_4_YEARS;
    n -= y4 * DAYS_PER_4_YEARS;
    // the last year of a 4-year cycle is the leap year
    let y1 = (n / DAYS_PER_YEAR).min(3);
    n -= y1 * DAYS_PER_YEAR;

    let year = 400 * y400 + 100 * y100 + 4 * y4 + y1 + 1;
    let leap = y1 == 3 && (y4 != 24 || y100 == 3);
    let days = days_to_month(leap);

    // n < days[m] first holds at or after the estimate n / 32 + 1
    let mut month = (n >> 5) + 1;
    while n >= days[month as usize] {
        month += 1;
    }
    let day = n - days[(month - 1) as usize] + 1;
    (year, month, day, n + 1)
}

pub fn day_of_week(ticks: i64) -> DayOfWeek {
    DayOfWeek::from_index(((ticks / TICKS_PER_DAY + 1) % 7) as u32)
}

#[inline]
pub(crate) const fn hour_of(ticks: i64) -> i32 {
    ((ticks / crate::TICKS_PER_HOUR) % 24) as i32
}

#[inline]
pub(crate) const fn minute_of(ticks: i64) -> i32 {
    ((ticks / crate::TICKS_PER_MINUTE) % 60) as i32
}

#[inline]
pub(crate) const fn second_of(ticks: i64) -> i32 {
    ((ticks / TICKS_PER_SECOND) % 60) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_TICKS;

    #[test]
    fn test_leap_years() {
        assert!(!is_leap_year(1900).unwrap());
        assert!(is_leap_year(2000).unwrap());
        assert!(is_leap_year(2024).unwrap());
        assert!(!is_leap_year(2023).unwrap());
        assert!(is_leap_year(0).is_err());
        assert!(is_leap_year(10000).is_err());
    }

    #[test]
    fn test_leap_rule_matches_definition() {
        for y in 1..=9999 {
            let expected = y % 4 == 0 && (y % 100 != 0 || y % 400 == 0);
            assert_eq!(is_leap_year(y).unwrap(), expected, "year {y}");
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2023, 4).unwrap(), 30);
        assert_eq!(days_in_month(2023, 12).unwrap(), 31);
        assert!(days_in_month(2023, 0).is_err());
        assert!(days_in_month(2023, 13).is_err());
        assert!(days_in_month(0, 1).is_err());
    }

    #[test]
    fn test_date_parts_to_ticks_validation() {
        assert_eq!(date_parts_to_ticks(1, 1, 1).unwrap(), 0);
        assert!(date_parts_to_ticks(0, 1, 1).is_err());
        assert!(date_parts_to_ticks(10000, 1, 1).is_err());
        assert!(date_parts_to_ticks(2023, 13, 1).is_err());
        assert!(date_parts_to_ticks(2023, 2, 29).is_err());
        assert!(date_parts_to_ticks(2024, 2, 29).is_ok());
        assert!(date_parts_to_ticks(2024, 4, 31).is_err());
        assert!(date_parts_to_ticks(2024, 1, 0).is_err());
    }

    #[test]
    fn test_time_parts_to_ticks_validation() {
        assert_eq!(time_parts_to_ticks(0, 0, 0).unwrap(), 0);
        assert_eq!(
            time_parts_to_ticks(23, 59, 59).unwrap(),
            crate::TICKS_PER_DAY - TICKS_PER_SECOND
        );
        assert!(time_parts_to_ticks(24, 0, 0).is_err());
        assert!(time_parts_to_ticks(0, 60, 0).is_err());
        assert!(time_parts_to_ticks(0, 0, 60).is_err());
        assert!(time_parts_to_ticks(-1, 0, 0).is_err());
        assert_eq!(
            time_parts_ms_to_ticks(0, 0, 1, 500).unwrap(),
            TICKS_PER_SECOND + 500 * TICKS_PER_MILLISECOND
        );
        assert!(time_parts_ms_to_ticks(0, 0, 0, 1000).is_err());
    }

    #[test]
    fn test_ticks_to_date_parts_boundaries() {
        assert_eq!(ticks_to_date_parts(0), (1, 1, 1, 1));
        assert_eq!(ticks_to_date_parts(MAX_TICKS), (9999, 12, 31, 365));
        // 400-year cycle boundaries
        let t = date_parts_to_ticks(2000, 12, 31).unwrap();
        assert_eq!(ticks_to_date_parts(t), (2000, 12, 31, 366));
        let t = date_parts_to_ticks(2001, 1, 1).unwrap();
        assert_eq!(ticks_to_date_parts(t), (2001, 1, 1, 1));
        // century years that are not leap years
        let t = date_parts_to_ticks(1900, 12, 31).unwrap();
        assert_eq!(ticks_to_date_parts(t), (1900, 12, 31, 365));
        let t = date_parts_to_ticks(2024, 2, 29).unwrap();
        assert_eq!(ticks_to_date_parts(t), (2024, 2, 29, 60));
        let t = date_parts_to_ticks(2024, 3, 1).unwrap();
        assert_eq!(ticks_to_date_parts(t), (2024, 3, 1, 61));
    }

    #[test]
    fn test_every_day_of_a_leap_cycle_round_trips() {
        for year in [1, 4, 100, 400, 1600, 1900, 2000, 2023, 2024, 9996, 9999] {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month).unwrap() {
                    let ticks = date_parts_to_ticks(year, month, day).unwrap();
                    let (y, m, d, _) = ticks_to_date_parts(ticks + crate::TICKS_PER_DAY - 1);
                    assert_eq!((y, m, d), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn test_day_of_week_sequence() {
        assert_eq!(day_of_week(0), DayOfWeek::Monday);
        let mut expected = DayOfWeek::Monday;
        for day in 0..3000i64 {
            assert_eq!(day_of_week(day * crate::TICKS_PER_DAY), expected);
            expected = expected.succ();
        }
        let t = date_parts_to_ticks(2024, 1, 1).unwrap();
        assert_eq!(day_of_week(t), DayOfWeek::Monday);
        let t = date_parts_to_ticks(1970, 1, 1).unwrap();
        assert_eq!(day_of_week(t), DayOfWeek::Thursday);
        assert_eq!(day_of_week(MAX_TICKS), DayOfWeek::Friday);
    }

    #[test]
    fn test_date_parts_projection() {
        let ticks = date_parts_to_ticks(2023, 12, 25).unwrap()
            + time_parts_ms_to_ticks(14, 30, 45, 123).unwrap()
            + 4567;
        let parts = DateParts::from_ticks(ticks, Kind::Utc);
        assert_eq!(parts.year(), 2023);
        assert_eq!(parts.month(), 12);
        assert_eq!(parts.day(), 25);
        assert_eq!(parts.hour(), 14);
        assert_eq!(parts.minute(), 30);
        assert_eq!(parts.second(), 45);
        assert_eq!(parts.millisecond(), 123);
        assert_eq!(parts.fraction(), 1234567);
        assert_eq!(parts.day_of_year(), 359);
        assert_eq!(parts.day_of_week(), DayOfWeek::Monday);
        assert_eq!(parts.kind(), Kind::Utc);
    }
}
