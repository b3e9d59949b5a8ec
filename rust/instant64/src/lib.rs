//! Fixed-width, tick-based point-in-time value type.
//!
//! An [`Instant`] packs a count of 100-nanosecond ticks since
//! `0001-01-01T00:00:00` and a [`Kind`] tag into a single 64-bit word. The crate
//! provides:
//!
//! - **Calendar math**: proleptic-Gregorian conversion between ticks and
//!   year/month/day fields ([`calendar`])
//! - **Range-checked arithmetic**: tick, unit, month and year offsets that
//!   report [`ErrorKind::OutOfRange`] instead of wrapping ([`arithmetic`])
//! - **Kind conversion**: local/UTC conversion through an explicit
//!   [`TimeZoneProvider`] and [`Clock`] ([`conversion`])
//! - **Binary serialization**: the 64-bit interchange word, including the
//!   UTC-shifted local variant ([`binary`])
//!
//! # Key Types
//!
//! - [`Instant`] - The value type
//! - [`TickSpan`] - Signed difference between two instants
//! - [`DateParts`] - Read-only calendar projection for formatters
//! - [`TimeZoneProvider`] - Source of UTC offsets for local time

pub mod arithmetic;
pub mod binary;
pub mod calendar;
pub mod clock;
pub mod conversion;
pub mod encoding;
pub mod error;
pub mod instant;
pub mod result;
pub mod span;
#[cfg(feature = "chrono")]
pub mod system;
pub mod time_zone;


pub use calendar::{DateParts, DayOfWeek};
pub use clock::{Clock, FixedClock};
pub use encoding::Kind;
pub use error::{Error, ErrorKind};
pub use instant::Instant;
pub use result::Result;
pub use span::TickSpan;
#[cfg(feature = "chrono")]
pub use system::{SystemClock, SystemTimeZone};
pub use time_zone::{
    DaylightRuleZone, FixedOffsetZone, LocalOffset, LocalReadingStatus, TimeZoneProvider,
    TransitionRule, UtcOffset, ZoneId,
};

pub const TICKS_PER_MILLISECOND: i64 = 10000;
pub const TICKS_PER_SECOND: i64 = TICKS_PER_MILLISECOND * 1000;
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

pub const NANOSECONDS_PER_TICK: i64 = 100;

pub const DAYS_PER_YEAR: i32 = 365;
pub const DAYS_PER_4_YEARS: i32 = DAYS_PER_YEAR * 4 + 1; // 1461
pub const DAYS_PER_100_YEARS: i32 = DAYS_PER_4_YEARS * 25 - 1; // 36524
pub const DAYS_PER_400_YEARS: i32 = DAYS_PER_100_YEARS * 4 + 1; // 146097
pub const DAYS_TO_10000: i32 = DAYS_PER_400_YEARS * 25 - 366; // 3652059

/// Tick count of 9999-12-31T23:59:59.9999999.
pub const MAX_TICKS: i64 = DAYS_TO_10000 as i64 * TICKS_PER_DAY - 1;

/// Ticks between 0001-01-01 and the Unix epoch (1970-01-01).
pub const TICKS_TILL_UNIX_TIME: i64 = 621355968000000000;

/// Ticks between 0001-01-01 and the Windows file time epoch (1601-01-01).
pub const TICKS_TILL_FILE_TIME: i64 = 504911232000000000;
