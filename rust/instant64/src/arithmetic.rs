//! Range-checked arithmetic on [`Instant`].
//!
//! Every operation keeps the kind and the ambiguity flag of its input and
//! either returns an instant in `[0, MAX_TICKS]` or fails with
//! [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange). The only silent
//! adjustment is the day clamp of [`Instant::add_months`].

use crate::{
    MAX_TICKS, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND, calendar, encoding, error::Error, instant::Instant, result::Result,
    span::TickSpan,
};

pub const MAX_MONTHS_OFFSET: i32 = 120000;
pub const MAX_YEARS_OFFSET: i32 = 10000;

impl Instant {
    /// Re-packs `ticks` with this instant's kind and ambiguity flag.
    fn with_ticks(self, ticks: i64) -> Result<Instant> {
        let (_, kind, ambiguous) = encoding::unpack(self.word());
        Ok(Instant::from_word_unchecked(encoding::pack(ticks, kind, ambiguous)?))
    }

    /// Adds a signed number of ticks.
    ///
    /// # Examples
    /// ```rust
    /// # use instant64::{Instant, Kind, TICKS_PER_HOUR};
    /// let dt = Instant::try_from_ymd(2023, 1, 1, Kind::Local).unwrap();
    /// let later = dt.add_ticks(TICKS_PER_HOUR).unwrap();
    /// assert_eq!(later.hour(), 1);
    /// assert_eq!(later.kind(), Kind::Local);
    /// assert!(Instant::MIN.add_ticks(-1).is_err());
    /// ```
    pub fn add_ticks(self, delta: i64) -> Result<Instant> {
        let ticks = self
            .ticks()
            .checked_add(delta)
            .ok_or_else(Error::ticks_out_of_range)?;
        self.with_ticks(ticks)
    }

    /// Adds `value` units of `unit_ticks` ticks each; `value` may be fractional
    /// and is rounded to the nearest tick.
    pub fn add_scaled(self, value: f64, unit_ticks: i64) -> Result<Instant> {
        self.add_span(TickSpan::try_from_scaled(value, unit_ticks)?)
    }

    pub fn add_days(self, days: f64) -> Result<Instant> {
        self.add_scaled(days, TICKS_PER_DAY)
    }

    pub fn add_hours(self, hours: f64) -> Result<Instant> {
        self.add_scaled(hours, TICKS_PER_HOUR)
    }

    pub fn add_minutes(self, minutes: f64) -> Result<Instant> {
        self.add_scaled(minutes, TICKS_PER_MINUTE)
    }

    pub fn add_seconds(self, seconds: f64) -> Result<Instant> {
        self.add_scaled(seconds, TICKS_PER_SECOND)
    }

    pub fn add_milliseconds(self, milliseconds: f64) -> Result<Instant> {
        self.add_scaled(milliseconds, TICKS_PER_MILLISECOND)
    }

    pub fn add_span(self, span: TickSpan) -> Result<Instant> {
        self.add_ticks(span.ticks())
    }

    pub fn subtract_span(self, span: TickSpan) -> Result<Instant> {
        let delta = span
            .ticks()
            .checked_neg()
            .ok_or_else(Error::ticks_out_of_range)?;
        self.add_ticks(delta)
    }

    /// Signed distance from `other` to `self`. Kinds are not reconciled.
    pub fn subtract(self, other: Instant) -> TickSpan {
        self - other
    }

    /// Adds `delta` ticks, clamping the result to `[0, MAX_TICKS]`.
    pub fn saturating_add_ticks(self, delta: i64) -> Instant {
        let ticks = self.ticks().saturating_add(delta).clamp(0, MAX_TICKS);
        let (_, kind, ambiguous) = encoding::unpack(self.word());
        Instant::from_ticks_unchecked(ticks, kind, ambiguous)
    }

    /// Adds calendar months.
    ///
    /// The time of day is kept. When the target month is shorter than the
    /// source day, the day is clamped to the target month's last day.
    ///
    /// Fails if `months` is outside `[-120000, 120000]` or the resulting year
    /// is outside `1..=9999`.
    ///
    /// # Examples
    /// ```rust
    /// # use instant64::{Instant, Kind};
    /// let jan31 = Instant::try_from_ymd(2024, 1, 31, Kind::Utc).unwrap();
    /// let feb = jan31.add_months(1).unwrap();
    /// assert_eq!((feb.year(), feb.month(), feb.day()), (2024, 2, 29));
    /// ```
    pub fn add_months(self, months: i32) -> Result<Instant> {
        crate::verify_range!(
            months,
            (-MAX_MONTHS_OFFSET..=MAX_MONTHS_OFFSET).contains(&months)
        );
        let (year, month, day, _) = calendar::ticks_to_date_parts(self.ticks());
        let (year, month) = shift_month(year, month, months);
        crate::verify_range!(year, (1..=9999).contains(&year));
        let day = day.min(calendar::days_in_month(year, month)?);
        let ticks = calendar::date_parts_to_ticks(year, month, day)? + self.ticks() % TICKS_PER_DAY;
        self.with_ticks(ticks)
    }

    /// Adds `years * 12` months. Fails if `years` is outside
    /// `[-10000, 10000]`.
    pub fn add_years(self, years: i32) -> Result<Instant> {
        crate::verify_range!(
            years,
            (-MAX_YEARS_OFFSET..=MAX_YEARS_OFFSET).contains(&years)
        );
        self.add_months(years * 12)
    }
}

/// Moves `(year, month)` by `months`, carrying into the year.
fn shift_month(year: i32, month: i32, months: i32) -> (i32, i32) {
    let index = month - 1 + months;
    (year + index.div_euclid(12), index.rem_euclid(12) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    fn ymd(year: i32, month: i32, day: i32) -> Instant {
        Instant::try_from_ymd(year, month, day, Kind::Utc).unwrap()
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2024, 1, 1), (2024, 2));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 1, -12), (2023, 1));
        assert_eq!(shift_month(2024, 1, -13), (2022, 12));
        assert_eq!(shift_month(2024, 3, 24), (2026, 3));
    }

    #[test]
    fn test_add_months_clamps_day() {
        let r = ymd(2024, 1, 31).add_months(1).unwrap();
        assert!(r.is_identical(&ymd(2024, 2, 29)));
        let r = ymd(2023, 1, 31).add_months(1).unwrap();
        assert!(r.is_identical(&ymd(2023, 2, 28)));
        let r = ymd(2024, 3, 31).add_months(-1).unwrap();
        assert!(r.is_identical(&ymd(2024, 2, 29)));
        let r = ymd(2024, 5, 31).add_months(1).unwrap();
        assert!(r.is_identical(&ymd(2024, 6, 30)));
    }

    #[test]
    fn test_add_months_keeps_time_of_day() {
        let dt = Instant::try_from_ymd_hms_ms(2023, 10, 31, 22, 15, 1, 250, Kind::Local).unwrap();
        let r = dt.add_months(4).unwrap();
        assert_eq!((r.year(), r.month(), r.day()), (2024, 2, 29));
        assert_eq!(r.time_of_day(), dt.time_of_day());
        assert_eq!(r.kind(), Kind::Local);
    }

    #[test]
    fn test_add_months_limits() {
        assert!(ymd(2000, 1, 1).add_months(120001).is_err());
        assert!(ymd(2000, 1, 1).add_months(-120001).is_err());
        assert!(ymd(9999, 12, 1).add_months(1).is_err());
        assert!(ymd(1, 1, 1).add_months(-1).is_err());
        assert!(ymd(1, 1, 1).add_months(119987).is_ok());
        let last = ymd(1, 1, 1).add_months(119987).unwrap();
        assert_eq!((last.year(), last.month()), (9999, 12));
    }

    #[test]
    fn test_add_years() {
        let r = ymd(2024, 2, 29).add_years(1).unwrap();
        assert!(r.is_identical(&ymd(2025, 2, 28)));
        let r = ymd(2024, 2, 29).add_years(-4).unwrap();
        assert!(r.is_identical(&ymd(2020, 2, 29)));
        assert!(ymd(1, 1, 1).add_years(10001).is_err());
        assert!(ymd(1, 1, 1).add_years(-10001).is_err());
        assert!(ymd(1, 1, 1).add_years(9999).is_err());
        assert!(ymd(1, 1, 1).add_years(9998).is_ok());
    }

    #[test]
    fn test_add_ticks_range() {
        assert!(Instant::MAX.add_ticks(1).is_err());
        assert!(Instant::MIN.add_ticks(-1).is_err());
        assert!(Instant::MIN.add_ticks(i64::MIN).is_err());
        assert!(Instant::MAX.add_ticks(i64::MAX).is_err());
        assert_eq!(Instant::MIN.add_ticks(MAX_TICKS).unwrap(), Instant::MAX);
    }

    #[test]
    fn test_add_scaled_units() {
        let base = ymd(2023, 6, 15);
        assert_eq!(base.add_days(1.5).unwrap().hour(), 12);
        assert_eq!(base.add_hours(-0.5).unwrap().minute(), 30);
        assert_eq!(base.add_minutes(90.0).unwrap().hour(), 1);
        assert_eq!(base.add_seconds(0.25).unwrap().millisecond(), 250);
        assert_eq!(base.add_milliseconds(0.0001).unwrap().ticks(), base.ticks() + 1);
        assert!(base.add_days(f64::NAN).is_err());
        assert!(base.add_days(1e20).is_err());
        assert!(base.add_days(3_000_000.0).is_err());
        assert!(base.add_milliseconds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_span_operations() {
        let a = ymd(2023, 6, 15);
        let b = a.add_span(TickSpan::from_hours(5).unwrap()).unwrap();
        assert_eq!(b.subtract(a), TickSpan::from_hours(5).unwrap());
        assert!(b.subtract_span(TickSpan::from_hours(5).unwrap()).unwrap().is_identical(&a));
        assert!(a.subtract_span(TickSpan::from_ticks(i64::MIN)).is_err());
    }

    #[test]
    fn test_saturating_add_ticks() {
        let max_local = Instant::max_with_kind(Kind::Local);
        assert!(max_local.saturating_add_ticks(10).is_identical(&max_local));
        let min_utc = Instant::min_with_kind(Kind::Utc);
        assert!(min_utc.saturating_add_ticks(i64::MIN).is_identical(&min_utc));
    }

    #[test]
    fn test_kind_and_ambiguity_preserved() {
        let ambiguous = Instant::from_ticks_unchecked(ymd(2023, 11, 5).ticks(), Kind::Local, true);
        for r in [
            ambiguous.add_ticks(1).unwrap(),
            ambiguous.add_days(1.0).unwrap(),
            ambiguous.add_months(1).unwrap(),
            ambiguous.add_years(1).unwrap(),
        ] {
            assert_eq!(r.kind(), Kind::Local);
            assert!(r.is_ambiguous_dst());
        }
    }
}
