//! Operating-system clock and local zone, backed by `chrono`.

use crate::{
    MAX_TICKS, NANOSECONDS_PER_TICK, TICKS_PER_SECOND, TICKS_TILL_UNIX_TIME,
    clock::Clock,
    instant::Instant,
    result::Result,
    time_zone::{LocalOffset, LocalReadingStatus, TimeZoneProvider, UtcOffset, ZoneId},
};
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, TimeZone, Utc};

/// The system wall clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_now_ticks(&self) -> i64 {
        let utc: DateTime<Utc> = Utc::now();
        let seconds = utc.timestamp();
        let nanoseconds = utc.timestamp_subsec_nanos();
        TICKS_TILL_UNIX_TIME + seconds * TICKS_PER_SECOND + (nanoseconds as i64) / NANOSECONDS_PER_TICK
    }
}

/// The operating system's local time zone, as reported by [`chrono::Local`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemTimeZone;

fn naive_from_ticks(ticks: i64) -> Option<NaiveDateTime> {
    let ticks = ticks.clamp(0, MAX_TICKS);
    let from_unix = ticks - TICKS_TILL_UNIX_TIME;
    let secs = from_unix.div_euclid(TICKS_PER_SECOND);
    let nsecs = (from_unix.rem_euclid(TICKS_PER_SECOND) * NANOSECONDS_PER_TICK) as u32;
    DateTime::from_timestamp(secs, nsecs).map(|dt| dt.naive_utc())
}

fn offset_ticks(offset: FixedOffset) -> i64 {
    offset.local_minus_utc() as i64 * TICKS_PER_SECOND
}

impl TimeZoneProvider for SystemTimeZone {
    fn utc_offset_for_instant(&self, utc: Instant) -> UtcOffset {
        let Some(naive) = naive_from_ticks(utc.ticks()) else {
            return UtcOffset::unique(0);
        };
        let offset = Local.offset_from_utc_datetime(&naive);
        let is_ambiguous = match naive_from_ticks(utc.ticks() + offset_ticks(offset)) {
            Some(reading) => matches!(
                Local.offset_from_local_datetime(&reading),
                LocalResult::Ambiguous(earliest, _) if earliest == offset
            ),
            None => false,
        };
        UtcOffset {
            offset_ticks: offset_ticks(offset),
            is_ambiguous,
        }
    }

    fn utc_offset_for_local_reading(&self, local: Instant) -> LocalOffset {
        let Some(naive) = naive_from_ticks(local.ticks()) else {
            return LocalOffset::unique(0);
        };
        match Local.offset_from_local_datetime(&naive) {
            LocalResult::Single(offset) => LocalOffset::unique(offset_ticks(offset)),
            LocalResult::Ambiguous(earliest, latest) => LocalOffset {
                offset_ticks: offset_ticks(latest),
                status: LocalReadingStatus::Ambiguous {
                    daylight_offset_ticks: offset_ticks(earliest),
                },
            },
            LocalResult::None => LocalOffset {
                offset_ticks: offset_ticks(Local.offset_from_utc_datetime(&naive)),
                status: LocalReadingStatus::Invalid,
            },
        }
    }

    fn identity(&self) -> ZoneId {
        match std::env::var("TZ") {
            Ok(tz) if !tz.is_empty() => ZoneId::new(format!("Local:{tz}")),
            _ => ZoneId::new("Local"),
        }
    }
}

/// Conversions against the operating system's clock and zone.
impl Instant {
    pub fn utc_now() -> Instant {
        Instant::now_utc(&SystemClock)
    }

    pub fn local_now() -> Instant {
        Instant::now_local(&SystemClock, &SystemTimeZone)
    }

    /// Converts to `Utc` using the system time zone; see
    /// [`to_utc_with_provider`](Instant::to_utc_with_provider).
    pub fn to_utc(self) -> Instant {
        self.to_utc_with_provider(&SystemTimeZone)
    }

    /// Converts to `Local` using the system time zone; see
    /// [`to_local_with_provider`](Instant::to_local_with_provider).
    pub fn to_local(self) -> Instant {
        self.to_local_with_provider(&SystemTimeZone)
    }

    pub fn to_binary(&self) -> u64 {
        self.to_binary_with_provider(&SystemTimeZone)
    }

    pub fn from_binary(word: u64) -> Result<Instant> {
        Instant::from_binary_with_provider(word, &SystemTimeZone)
    }
}
