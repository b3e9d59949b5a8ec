use crate::{
    MAX_TICKS, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND, error::Error, result::Result,
};
use num_traits::{ToPrimitive, Zero};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed duration measured in 100-nanosecond ticks.
///
/// `TickSpan` is what subtracting two [`Instant`](crate::Instant)s yields, and
/// what the unit-scaled `add_*` operations convert their argument into before
/// touching the instant. Any span whose magnitude is at most [`MAX_TICKS`] can
/// be added to some instant; larger spans are still representable but always
/// overflow the instant range.
///
/// # Examples
///
/// ```
/// # use instant64::TickSpan;
/// let span = TickSpan::from_hours(36).unwrap();
/// assert_eq!(span.days(), 1);
/// assert_eq!(span.hours(), 12);
/// assert_eq!(span.to_string(), "1.12:00:00");
/// ```
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct TickSpan {
    ticks: i64,
}

// Constructors
impl TickSpan {
    pub const ZERO: TickSpan = TickSpan { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> TickSpan {
        TickSpan { ticks }
    }

    pub fn from_days(days: i64) -> Result<TickSpan> {
        Self::from_units(days, TICKS_PER_DAY, "days")
    }

    pub fn from_hours(hours: i64) -> Result<TickSpan> {
        Self::from_units(hours, TICKS_PER_HOUR, "hours")
    }

    pub fn from_minutes(minutes: i64) -> Result<TickSpan> {
        Self::from_units(minutes, TICKS_PER_MINUTE, "minutes")
    }

    pub fn from_seconds(seconds: i64) -> Result<TickSpan> {
        Self::from_units(seconds, TICKS_PER_SECOND, "seconds")
    }

    pub fn from_milliseconds(milliseconds: i64) -> Result<TickSpan> {
        Self::from_units(milliseconds, TICKS_PER_MILLISECOND, "milliseconds")
    }

    fn from_units(value: i64, unit_ticks: i64, name: &str) -> Result<TickSpan> {
        value
            .checked_mul(unit_ticks)
            .map(TickSpan::from_ticks)
            .ok_or_else(|| Error::out_of_range(name, format!("{value} overflows the tick range")))
    }

    /// Converts a fractional count of `unit_ticks` into a span, rounding to the
    /// nearest tick with halves away from zero.
    ///
    /// Fails if `value` is not finite or the result's magnitude exceeds
    /// [`MAX_TICKS`], since no instant could absorb such a span.
    ///
    /// ```
    /// # use instant64::{TickSpan, TICKS_PER_DAY};
    /// let span = TickSpan::try_from_scaled(1.5, TICKS_PER_DAY).unwrap();
    /// assert_eq!(span.ticks(), TICKS_PER_DAY * 3 / 2);
    /// assert!(TickSpan::try_from_scaled(f64::NAN, TICKS_PER_DAY).is_err());
    /// ```
    pub fn try_from_scaled(value: f64, unit_ticks: i64) -> Result<TickSpan> {
        let ticks = (value * unit_ticks as f64)
            .round()
            .to_i64()
            .filter(|ticks| (-MAX_TICKS..=MAX_TICKS).contains(ticks))
            .ok_or_else(|| {
                Error::out_of_range("value", format!("{value} x {unit_ticks} ticks overflows"))
            })?;
        Ok(TickSpan { ticks })
    }
}

// Getters
impl TickSpan {
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Whole days, truncated toward zero.
    pub const fn days(&self) -> i64 {
        self.ticks / TICKS_PER_DAY
    }

    pub const fn hours(&self) -> i32 {
        ((self.ticks / TICKS_PER_HOUR) % 24) as i32
    }

    pub const fn minutes(&self) -> i32 {
        ((self.ticks / TICKS_PER_MINUTE) % 60) as i32
    }

    pub const fn seconds(&self) -> i32 {
        ((self.ticks / TICKS_PER_SECOND) % 60) as i32
    }

    pub const fn milliseconds(&self) -> i32 {
        ((self.ticks / TICKS_PER_MILLISECOND) % 1000) as i32
    }

    pub fn total_days(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_DAY as f64
    }

    pub fn total_hours(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_HOUR as f64
    }

    pub fn total_minutes(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_MINUTE as f64
    }

    pub fn total_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    pub fn total_milliseconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_MILLISECOND as f64
    }

    pub fn checked_add(self, other: TickSpan) -> Option<TickSpan> {
        self.ticks.checked_add(other.ticks).map(TickSpan::from_ticks)
    }

    pub fn checked_sub(self, other: TickSpan) -> Option<TickSpan> {
        self.ticks.checked_sub(other.ticks).map(TickSpan::from_ticks)
    }

    /// `None` only for a span of `i64::MIN` ticks.
    pub fn checked_neg(self) -> Option<TickSpan> {
        self.ticks.checked_neg().map(TickSpan::from_ticks)
    }
}

// Operators
//
// These overflow exactly like `i64`: they panic in debug builds and wrap in
// release builds. Use `checked_add`, `checked_sub` and `checked_neg` for spans
// that may come near `i64::MIN` or `i64::MAX`.

/// # Panics
///
/// Panics in debug builds if the sum overflows `i64`; see
/// [`TickSpan::checked_add`].
impl Add for TickSpan {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        TickSpan {
            ticks: self.ticks + other.ticks,
        }
    }
}

/// # Panics
///
/// Panics in debug builds if the difference overflows `i64`; see
/// [`TickSpan::checked_sub`].
impl Sub for TickSpan {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        TickSpan {
            ticks: self.ticks - other.ticks,
        }
    }
}

impl AddAssign for TickSpan {
    fn add_assign(&mut self, other: TickSpan) {
        self.ticks += other.ticks;
    }
}

impl SubAssign for TickSpan {
    fn sub_assign(&mut self, other: Self) {
        self.ticks -= other.ticks;
    }
}

/// # Panics
///
/// Panics in debug builds when negating `i64::MIN` ticks; see
/// [`TickSpan::checked_neg`].
impl Neg for TickSpan {
    type Output = Self;

    fn neg(self) -> Self {
        TickSpan { ticks: -self.ticks }
    }
}

/// Formats as `[-][d.]hh:mm:ss[.fffffff]`.
impl ::std::fmt::Display for TickSpan {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        let magnitude = self.ticks.unsigned_abs();
        if self.ticks < 0 {
            f.write_str("-")?;
        }
        let days = magnitude / TICKS_PER_DAY as u64;
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}",
            (magnitude / TICKS_PER_HOUR as u64) % 24,
            (magnitude / TICKS_PER_MINUTE as u64) % 60,
            (magnitude / TICKS_PER_SECOND as u64) % 60
        )?;
        let fraction = magnitude % TICKS_PER_SECOND as u64;
        if fraction > 0 {
            write!(f, ".{fraction:07}")?;
        }
        Ok(())
    }
}

impl Zero for TickSpan {
    fn zero() -> Self {
        TickSpan::ZERO
    }

    fn is_zero(&self) -> bool {
        self.ticks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_constructors() {
        assert_eq!(TickSpan::from_days(2).unwrap().ticks(), 2 * TICKS_PER_DAY);
        assert_eq!(TickSpan::from_hours(-3).unwrap().ticks(), -3 * TICKS_PER_HOUR);
        assert_eq!(TickSpan::from_minutes(1).unwrap().ticks(), TICKS_PER_MINUTE);
        assert_eq!(TickSpan::from_seconds(1).unwrap().ticks(), TICKS_PER_SECOND);
        assert_eq!(TickSpan::from_milliseconds(1).unwrap().ticks(), TICKS_PER_MILLISECOND);
        assert!(TickSpan::from_days(i64::MAX / 2).is_err());
    }

    #[test]
    fn test_scaled_rounding() {
        // half a tick rounds away from zero in both directions
        assert_eq!(TickSpan::try_from_scaled(0.5, 1).unwrap().ticks(), 1);
        assert_eq!(TickSpan::try_from_scaled(-0.5, 1).unwrap().ticks(), -1);
        assert_eq!(TickSpan::try_from_scaled(0.49, 1).unwrap().ticks(), 0);
        assert_eq!(TickSpan::try_from_scaled(2.5, 1).unwrap().ticks(), 3);
        assert_eq!(
            TickSpan::try_from_scaled(-2.25, TICKS_PER_HOUR).unwrap().ticks(),
            -9 * TICKS_PER_HOUR / 4
        );
    }

    #[test]
    fn test_scaled_overflow() {
        assert!(TickSpan::try_from_scaled(f64::NAN, TICKS_PER_DAY).is_err());
        assert!(TickSpan::try_from_scaled(f64::INFINITY, 1).is_err());
        assert!(TickSpan::try_from_scaled(f64::NEG_INFINITY, 1).is_err());
        assert!(TickSpan::try_from_scaled(1e300, TICKS_PER_DAY).is_err());
        assert!(TickSpan::try_from_scaled(3_652_060.0, TICKS_PER_DAY).is_err());
        assert!(TickSpan::try_from_scaled(-3_652_060.0, TICKS_PER_DAY).is_err());
        assert!(TickSpan::try_from_scaled(3_652_058.0, TICKS_PER_DAY).is_ok());
    }

    #[test]
    fn test_components() {
        let span = TickSpan::from_ticks(
            3 * TICKS_PER_DAY + 4 * TICKS_PER_HOUR + 5 * TICKS_PER_MINUTE + 6 * TICKS_PER_SECOND + 7,
        );
        assert_eq!(span.days(), 3);
        assert_eq!(span.hours(), 4);
        assert_eq!(span.minutes(), 5);
        assert_eq!(span.seconds(), 6);
        assert_eq!(span.milliseconds(), 0);
        assert!((span.total_days() - 3.17).abs() < 0.01);
        assert_eq!((-span).days(), -3);
    }

    #[test]
    fn test_display() {
        assert_eq!(TickSpan::ZERO.to_string(), "00:00:00");
        assert_eq!(TickSpan::from_minutes(90).unwrap().to_string(), "01:30:00");
        assert_eq!(
            (-TickSpan::from_ticks(TICKS_PER_DAY + TICKS_PER_SECOND + 5)).to_string(),
            "-1.00:00:01.0000005"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = TickSpan::from_hours(1).unwrap();
        let b = TickSpan::from_minutes(30).unwrap();
        assert_eq!((a + b).ticks(), 90 * TICKS_PER_MINUTE);
        assert_eq!((a - b).ticks(), 30 * TICKS_PER_MINUTE);
        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
        assert!(TickSpan::from_ticks(i64::MAX).checked_add(a).is_none());
        assert!(TickSpan::zero().is_zero());
    }

    #[test]
    fn test_checked_arithmetic_at_the_i64_edges() {
        let one = TickSpan::from_ticks(1);
        let min = TickSpan::from_ticks(i64::MIN);
        let max = TickSpan::from_ticks(i64::MAX);
        assert_eq!(min.checked_neg(), None);
        assert_eq!(max.checked_neg(), Some(TickSpan::from_ticks(-i64::MAX)));
        assert_eq!(min.checked_sub(one), None);
        assert_eq!(max.checked_add(one), None);
        assert_eq!(min.checked_add(one), Some(-max));
        assert_eq!(max.checked_sub(max), Some(TickSpan::zero()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_operator_overflow_panics_in_debug_builds() {
        let _ = -TickSpan::from_ticks(i64::MIN);
    }
}
