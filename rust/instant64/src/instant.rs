use crate::{
    MAX_TICKS, TICKS_PER_DAY, TICKS_PER_MILLISECOND, TICKS_PER_SECOND, TICKS_TILL_FILE_TIME,
    TICKS_TILL_UNIX_TIME,
    calendar::{self, DateParts, DayOfWeek},
    encoding::{self, Kind},
    error::Error,
    result::Result,
    span::TickSpan,
};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Sub;

const MIN_UNIX_SECONDS: i64 = -TICKS_TILL_UNIX_TIME / TICKS_PER_SECOND;
const MAX_UNIX_SECONDS: i64 = (MAX_TICKS - TICKS_TILL_UNIX_TIME) / TICKS_PER_SECOND;
const MIN_UNIX_MILLISECONDS: i64 = -TICKS_TILL_UNIX_TIME / TICKS_PER_MILLISECOND;
const MAX_UNIX_MILLISECONDS: i64 = (MAX_TICKS - TICKS_TILL_UNIX_TIME) / TICKS_PER_MILLISECOND;

/// A point in time: a tick count since `0001-01-01T00:00:00` plus a [`Kind`].
///
/// Ticks and kind share a single 64-bit word (see [`encoding`](crate::encoding)).
/// Instants are immutable values; every operation that "changes" one returns a
/// new instant.
///
/// Equality, ordering and hashing consider only the tick count, so a `Utc`
/// and a `Local` instant with the same reading compare equal. Use
/// [`Instant::is_identical`] to compare kinds as well.
///
/// Calendar fields are computed on demand from the ticks and never cached.
///
/// # Examples
///
/// ```
/// # use instant64::{Instant, Kind, DayOfWeek};
/// let dt = Instant::try_from_ymd_hms(2024, 2, 29, 13, 45, 10, Kind::Utc).unwrap();
/// assert_eq!(dt.year(), 2024);
/// assert_eq!(dt.day_of_year(), 60);
/// assert_eq!(dt.day_of_week(), DayOfWeek::Thursday);
/// assert_eq!(dt.to_string(), "2024-02-29T13:45:10.0000000Z");
/// ```
#[derive(Copy, Clone, Default)]
#[repr(C)]
pub struct Instant {
    word: u64,
}

impl Instant {
    /// `0001-01-01T00:00:00.0000000`, unspecified kind.
    pub const MIN: Instant = Instant::min_with_kind(Kind::Unspecified);
    /// `9999-12-31T23:59:59.9999999`, unspecified kind.
    pub const MAX: Instant = Instant::max_with_kind(Kind::Unspecified);

    pub const fn min_with_kind(kind: Kind) -> Instant {
        Instant {
            word: encoding::pack_unchecked(0, kind, false),
        }
    }

    pub const fn max_with_kind(kind: Kind) -> Instant {
        Instant {
            word: encoding::pack_unchecked(MAX_TICKS, kind, false),
        }
    }

    /// Number of 100-nanosecond ticks since `0001-01-01T00:00:00`.
    pub const fn ticks(&self) -> i64 {
        encoding::unpack(self.word).0
    }

    pub const fn kind(&self) -> Kind {
        encoding::unpack(self.word).1
    }

    /// Returns `true` for a local instant whose reading falls in a repeated
    /// (fall-back) hour and denotes the first, daylight-saving occurrence.
    pub const fn is_ambiguous_dst(&self) -> bool {
        encoding::unpack(self.word).2
    }

    /// Returns `true` if both instants carry the same ticks, kind and
    /// ambiguity flag.
    pub const fn is_identical(&self, other: &Instant) -> bool {
        self.word == other.word
    }

    pub(crate) const fn word(&self) -> u64 {
        self.word
    }

    /// Wraps a word whose tick field has already been validated.
    pub(crate) const fn from_word_unchecked(word: u64) -> Instant {
        Instant { word }
    }

    /// Builds an instant from ticks that are already known to be in range.
    pub(crate) const fn from_ticks_unchecked(ticks: i64, kind: Kind, ambiguous: bool) -> Instant {
        Instant {
            word: encoding::pack_unchecked(ticks, kind, ambiguous),
        }
    }
}

// Constructors
impl Instant {
    /// Creates an instant from a tick count.
    ///
    /// # Returns
    /// * `Ok(Instant)` if `0 <= ticks <= MAX_TICKS`
    /// * `Err` with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) otherwise
    ///
    /// # Examples
    /// ```rust
    /// # use instant64::{Instant, Kind, MAX_TICKS};
    /// assert!(Instant::from_ticks(MAX_TICKS, Kind::Utc).is_ok());
    /// assert!(Instant::from_ticks(-1, Kind::Utc).is_err());
    /// ```
    pub fn from_ticks(ticks: i64, kind: Kind) -> Result<Instant> {
        Ok(Instant {
            word: encoding::pack(ticks, kind, false)?,
        })
    }

    /// Creates an instant at midnight of the given date.
    pub fn try_from_ymd(year: i32, month: i32, day: i32, kind: Kind) -> Result<Instant> {
        Instant::from_ticks(calendar::date_parts_to_ticks(year, month, day)?, kind)
    }

    /// Creates an instant from date and time-of-day fields.
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) if
    /// any field is outside its domain: year `1..=9999`, month `1..=12`, day
    /// within the month, hour `0..=23`, minute and second `0..=59`.
    #[allow(clippy::too_many_arguments)]
    pub fn try_from_ymd_hms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        kind: Kind,
    ) -> Result<Instant> {
        let ticks = calendar::date_parts_to_ticks(year, month, day)?
            + calendar::time_parts_to_ticks(hour, minute, second)?;
        Instant::from_ticks(ticks, kind)
    }

    /// Like [`Instant::try_from_ymd_hms`] with a millisecond field `0..=999`.
    #[allow(clippy::too_many_arguments)]
    pub fn try_from_ymd_hms_ms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        kind: Kind,
    ) -> Result<Instant> {
        let ticks = calendar::date_parts_to_ticks(year, month, day)?
            + calendar::time_parts_ms_to_ticks(hour, minute, second, millisecond)?;
        Instant::from_ticks(ticks, kind)
    }

    /// Converts a UNIX timestamp (seconds since 1970-01-01 00:00:00 UTC) to a
    /// `Utc` instant.
    pub fn try_from_unix_seconds(seconds: i64) -> Result<Instant> {
        if !(MIN_UNIX_SECONDS..=MAX_UNIX_SECONDS).contains(&seconds) {
            return Err(Error::ticks_out_of_range());
        }
        Instant::from_ticks(seconds * TICKS_PER_SECOND + TICKS_TILL_UNIX_TIME, Kind::Utc)
    }

    /// Converts a UNIX timestamp in milliseconds to a `Utc` instant.
    pub fn try_from_unix_milliseconds(milliseconds: i64) -> Result<Instant> {
        if !(MIN_UNIX_MILLISECONDS..=MAX_UNIX_MILLISECONDS).contains(&milliseconds) {
            return Err(Error::ticks_out_of_range());
        }
        Instant::from_ticks(
            milliseconds * TICKS_PER_MILLISECOND + TICKS_TILL_UNIX_TIME,
            Kind::Utc,
        )
    }

    /// Converts a Windows file time (100-ns intervals since 1601-01-01 UTC) to a
    /// `Utc` instant.
    pub fn try_from_file_time_utc(file_time: i64) -> Result<Instant> {
        if !(0..=MAX_TICKS - TICKS_TILL_FILE_TIME).contains(&file_time) {
            return Err(Error::out_of_range(
                "file_time",
                format!("{file_time} is not a valid file time"),
            ));
        }
        Instant::from_ticks(file_time + TICKS_TILL_FILE_TIME, Kind::Utc)
    }

    /// Returns the same ticks tagged with `kind`. The ambiguity flag is
    /// cleared.
    pub const fn specify_kind(self, kind: Kind) -> Instant {
        Instant::from_ticks_unchecked(self.ticks(), kind, false)
    }

    /// Returns midnight of the same day, keeping the kind.
    pub const fn date(self) -> Instant {
        let ticks = self.ticks();
        let (_, kind, ambiguous) = encoding::unpack(self.word);
        Instant::from_ticks_unchecked(ticks - ticks % TICKS_PER_DAY, kind, ambiguous)
    }
}

// Calendar fields
impl Instant {
    /// Returns all calendar fields at once.
    pub fn date_parts(&self) -> DateParts {
        DateParts::from_ticks(self.ticks(), self.kind())
    }

    pub fn year(&self) -> i32 {
        calendar::ticks_to_date_parts(self.ticks()).0
    }

    pub fn month(&self) -> i32 {
        calendar::ticks_to_date_parts(self.ticks()).1
    }

    pub fn day(&self) -> i32 {
        calendar::ticks_to_date_parts(self.ticks()).2
    }

    /// Day within the year, `1..=366`.
    pub fn day_of_year(&self) -> i32 {
        calendar::ticks_to_date_parts(self.ticks()).3
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        calendar::day_of_week(self.ticks())
    }

    pub const fn hour(&self) -> i32 {
        calendar::hour_of(self.ticks())
    }

    pub const fn minute(&self) -> i32 {
        calendar::minute_of(self.ticks())
    }

    pub const fn second(&self) -> i32 {
        calendar::second_of(self.ticks())
    }

    pub const fn millisecond(&self) -> i32 {
        ((self.ticks() / TICKS_PER_MILLISECOND) % 1000) as i32
    }

    /// Elapsed time since midnight.
    pub const fn time_of_day(&self) -> TickSpan {
        TickSpan::from_ticks(self.ticks() % TICKS_PER_DAY)
    }
}

// Epoch conversions
impl Instant {
    /// Seconds since the UNIX epoch, rounded toward negative infinity. The kind
    /// is not consulted; convert to UTC first if needed.
    pub const fn to_unix_seconds(&self) -> i64 {
        (self.ticks() - TICKS_TILL_UNIX_TIME).div_euclid(TICKS_PER_SECOND)
    }

    pub const fn to_unix_milliseconds(&self) -> i64 {
        (self.ticks() - TICKS_TILL_UNIX_TIME).div_euclid(TICKS_PER_MILLISECOND)
    }

    /// Windows file time of this reading. Fails for readings before 1601-01-01.
    /// The kind is not consulted.
    pub fn to_file_time_utc(&self) -> Result<i64> {
        let file_time = self.ticks() - TICKS_TILL_FILE_TIME;
        if file_time < 0 {
            return Err(Error::out_of_range(
                "file_time",
                "instants before 1601-01-01 have no file time",
            ));
        }
        Ok(file_time)
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.ticks() == other.ticks()
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks().cmp(&other.ticks())
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticks().hash(state);
    }
}

/// Ticks between two readings. Both instants are in range, so the difference
/// cannot overflow; kinds are ignored.
impl Sub for Instant {
    type Output = TickSpan;

    fn sub(self, other: Instant) -> TickSpan {
        TickSpan::from_ticks(self.ticks() - other.ticks())
    }
}

impl ::std::fmt::Debug for Instant {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("Instant")
            .field("ticks", &self.ticks())
            .field("kind", &self.kind())
            .field("ambiguous_dst", &self.is_ambiguous_dst())
            .finish()
    }
}

/// Formats as `yyyy-MM-ddTHH:mm:ss.fffffff`, with a `Z` suffix for `Utc`.
impl ::std::fmt::Display for Instant {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        let parts = self.date_parts();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:07}",
            parts.year(),
            parts.month(),
            parts.day(),
            parts.hour(),
            parts.minute(),
            parts.second(),
            parts.fraction()
        )?;
        if parts.kind() == Kind::Utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// Serialized as the raw 64-bit word. Deserialization rejects words whose tick
/// field is out of range.
#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.to_binary_raw())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let word = <u64 as serde::Deserialize>::deserialize(deserializer)?;
        Instant::from_binary_raw(word).map_err(serde::de::Error::custom)
    }
}
