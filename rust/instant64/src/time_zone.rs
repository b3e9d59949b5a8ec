//! UTC offset providers.
//!
//! The conversion layer never reads ambient time-zone state. Everything it
//! needs to know about a zone comes from a [`TimeZoneProvider`], which answers
//! two questions: "what is the offset at this UTC instant" and "what is the
//! offset for this local wall-clock reading". The latter is where daylight
//! saving transitions show up as ambiguous (repeated) or invalid (skipped)
//! readings.

use crate::{
    MAX_TICKS, TICKS_PER_DAY, TICKS_PER_HOUR, calendar, calendar::DayOfWeek,
    error::Error, instant::Instant, result::Result,
};
use std::sync::Arc;

/// Largest zone offset accepted by the built-in providers, 14 hours.
pub const MAX_OFFSET_TICKS: i64 = 14 * TICKS_PER_HOUR;

/// Opaque identity of a provider's offset regime. Two providers with equal
/// identities are expected to report the same offsets.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ZoneId(Arc<str>);

impl ZoneId {
    pub fn new(id: impl Into<Arc<str>>) -> ZoneId {
        ZoneId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ::std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offset in effect at a UTC instant.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UtcOffset {
    /// `local - utc`, in ticks.
    pub offset_ticks: i64,
    /// The corresponding local reading occurs twice and this instant is the
    /// first (daylight) occurrence.
    pub is_ambiguous: bool,
}

impl UtcOffset {
    pub const fn unique(offset_ticks: i64) -> UtcOffset {
        UtcOffset {
            offset_ticks,
            is_ambiguous: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LocalReadingStatus {
    /// The reading maps to exactly one UTC instant.
    Unique,
    /// The reading occurs twice. `LocalOffset::offset_ticks` holds the
    /// standard-time offset (second occurrence); this is the daylight one.
    Ambiguous { daylight_offset_ticks: i64 },
    /// The reading falls in a skipped hour. `LocalOffset::offset_ticks` is the
    /// provider's best guess and the caller decides what to make of it.
    Invalid,
}

/// Offset for a local wall-clock reading.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LocalOffset {
    pub offset_ticks: i64,
    pub status: LocalReadingStatus,
}

impl LocalOffset {
    pub const fn unique(offset_ticks: i64) -> LocalOffset {
        LocalOffset {
            offset_ticks,
            status: LocalReadingStatus::Unique,
        }
    }

    pub const fn is_ambiguous(&self) -> bool {
        matches!(self.status, LocalReadingStatus::Ambiguous { .. })
    }

    pub const fn is_invalid(&self) -> bool {
        matches!(self.status, LocalReadingStatus::Invalid)
    }

    /// Picks the offset for a reading, using the daylight offset for ambiguous
    /// readings flagged as the daylight occurrence.
    pub const fn resolve(&self, ambiguous_dst: bool) -> i64 {
        match self.status {
            LocalReadingStatus::Ambiguous {
                daylight_offset_ticks,
            } if ambiguous_dst => daylight_offset_ticks,
            _ => self.offset_ticks,
        }
    }
}

/// Source of UTC offsets for one zone.
///
/// Implementations must be safe to query concurrently; all methods are
/// read-only.
pub trait TimeZoneProvider: Send + Sync {
    /// Offset in effect at `utc`. Only the ticks of `utc` are consulted.
    fn utc_offset_for_instant(&self, utc: Instant) -> UtcOffset;

    /// Offset for the wall-clock reading `local`. Only the ticks of `local`
    /// are consulted.
    fn utc_offset_for_local_reading(&self, local: Instant) -> LocalOffset;

    /// Identity of the offset regime, used to diagnose values that cross
    /// between processes with different local zones.
    fn identity(&self) -> ZoneId;
}

/// Clamps a provider-reported offset into `[-MAX_OFFSET_TICKS, MAX_OFFSET_TICKS]`.
fn bound_offset(offset_ticks: i64, zone: &impl TimeZoneProvider) -> i64 {
    let bounded = offset_ticks.clamp(-MAX_OFFSET_TICKS, MAX_OFFSET_TICKS);
    if bounded != offset_ticks {
        log::warn!(
            "zone {} reported offset {offset_ticks} ticks, clamping to {bounded}",
            zone.identity()
        );
    }
    bounded
}

/// [`TimeZoneProvider::utc_offset_for_instant`] with the offset bounded to
/// +/-14 hours. Conversion and serialization read offsets only through this
/// and [`local_reading_offset`], so tick arithmetic on them cannot overflow.
pub(crate) fn instant_offset(zone: &impl TimeZoneProvider, utc: Instant) -> UtcOffset {
    let offset = zone.utc_offset_for_instant(utc);
    UtcOffset {
        offset_ticks: bound_offset(offset.offset_ticks, zone),
        ..offset
    }
}

/// [`TimeZoneProvider::utc_offset_for_local_reading`] with both offsets
/// bounded to +/-14 hours.
pub(crate) fn local_reading_offset(zone: &impl TimeZoneProvider, local: Instant) -> LocalOffset {
    let offset = zone.utc_offset_for_local_reading(local);
    let status = match offset.status {
        LocalReadingStatus::Ambiguous {
            daylight_offset_ticks,
        } => LocalReadingStatus::Ambiguous {
            daylight_offset_ticks: bound_offset(daylight_offset_ticks, zone),
        },
        status => status,
    };
    LocalOffset {
        offset_ticks: bound_offset(offset.offset_ticks, zone),
        status,
    }
}

impl<T: TimeZoneProvider + ?Sized> TimeZoneProvider for &T {
    fn utc_offset_for_instant(&self, utc: Instant) -> UtcOffset {
        (**self).utc_offset_for_instant(utc)
    }

    fn utc_offset_for_local_reading(&self, local: Instant) -> LocalOffset {
        (**self).utc_offset_for_local_reading(local)
    }

    fn identity(&self) -> ZoneId {
        (**self).identity()
    }
}

impl<T: TimeZoneProvider + ?Sized> TimeZoneProvider for Arc<T> {
    fn utc_offset_for_instant(&self, utc: Instant) -> UtcOffset {
        (**self).utc_offset_for_instant(utc)
    }

    fn utc_offset_for_local_reading(&self, local: Instant) -> LocalOffset {
        (**self).utc_offset_for_local_reading(local)
    }

    fn identity(&self) -> ZoneId {
        (**self).identity()
    }
}

fn verify_offset(name: &str, offset_ticks: i64) -> Result<()> {
    if (-MAX_OFFSET_TICKS..=MAX_OFFSET_TICKS).contains(&offset_ticks) {
        Ok(())
    } else {
        Err(Error::out_of_range(
            name,
            format!("{offset_ticks} ticks is outside +/-14 hours"),
        ))
    }
}

/// A zone with a constant offset and no daylight saving.
#[derive(Clone, Debug)]
pub struct FixedOffsetZone {
    id: ZoneId,
    offset_ticks: i64,
}

impl FixedOffsetZone {
    pub fn new(id: impl Into<Arc<str>>, offset_ticks: i64) -> Result<FixedOffsetZone> {
        verify_offset("offset_ticks", offset_ticks)?;
        Ok(FixedOffsetZone {
            id: ZoneId::new(id),
            offset_ticks,
        })
    }

    pub fn utc() -> FixedOffsetZone {
        FixedOffsetZone {
            id: ZoneId::new("UTC"),
            offset_ticks: 0,
        }
    }

    pub fn offset_ticks(&self) -> i64 {
        self.offset_ticks
    }
}

impl TimeZoneProvider for FixedOffsetZone {
    fn utc_offset_for_instant(&self, _utc: Instant) -> UtcOffset {
        UtcOffset::unique(self.offset_ticks)
    }

    fn utc_offset_for_local_reading(&self, _local: Instant) -> LocalOffset {
        LocalOffset::unique(self.offset_ticks)
    }

    fn identity(&self) -> ZoneId {
        self.id.clone()
    }
}

/// A yearly transition moment: the `week`-th `day_of_week` of `month`
/// (week 5 means "last"), at `time_of_day_ticks` local wall-clock time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TransitionRule {
    month: i32,
    week: i32,
    day_of_week: DayOfWeek,
    time_of_day_ticks: i64,
}

impl TransitionRule {
    pub fn new(
        month: i32,
        week: i32,
        day_of_week: DayOfWeek,
        hour: i32,
        minute: i32,
    ) -> Result<TransitionRule> {
        crate::verify_range!(month, (1..=12).contains(&month));
        crate::verify_range!(week, (1..=5).contains(&week));
        Ok(TransitionRule {
            month,
            week,
            day_of_week,
            time_of_day_ticks: calendar::time_parts_to_ticks(hour, minute, 0)?,
        })
    }

    /// Local wall-clock ticks of this transition in `year`, which must be in
    /// `1..=9999`. The month is validated by [`TransitionRule::new`].
    fn local_ticks(&self, year: i32) -> i64 {
        debug_assert!((1..=9999).contains(&year));
        let first = calendar::date_parts_to_days_unchecked(year, self.month, 1);
        let first_dow = calendar::day_of_week(first * TICKS_PER_DAY).num_days_from_sunday() as i32;
        let wanted = self.day_of_week.num_days_from_sunday() as i32;
        let mut day = 1 + (wanted - first_dow).rem_euclid(7) + (self.week - 1) * 7;
        let month_days = calendar::days_in_month_unchecked(year, self.month);
        while day > month_days {
            day -= 7;
        }
        (first + day as i64 - 1) * TICKS_PER_DAY + self.time_of_day_ticks
    }
}

/// A zone with a standard offset and one daylight-saving period per year.
///
/// Daylight time starts at `start` (given in standard wall-clock time) and
/// ends at `end` (given in daylight wall-clock time). When `start` falls later
/// in the year than `end` the daylight period spans the new year, as in the
/// southern hemisphere.
#[derive(Clone, Debug)]
pub struct DaylightRuleZone {
    id: ZoneId,
    standard_offset_ticks: i64,
    daylight_delta_ticks: i64,
    start: TransitionRule,
    end: TransitionRule,
}

/// Transition moments of one year, in local wall-clock ticks.
struct YearTransitions {
    /// First skipped reading.
    gap_start: i64,
    /// First repeated reading.
    overlap_start: i64,
    /// First reading after the repeated hour.
    overlap_end: i64,
}

impl DaylightRuleZone {
    pub fn new(
        id: impl Into<Arc<str>>,
        standard_offset_ticks: i64,
        daylight_delta_ticks: i64,
        start: TransitionRule,
        end: TransitionRule,
    ) -> Result<DaylightRuleZone> {
        verify_offset("standard_offset_ticks", standard_offset_ticks)?;
        crate::verify_range!(
            daylight_delta_ticks,
            daylight_delta_ticks > 0 && daylight_delta_ticks <= 2 * TICKS_PER_HOUR
        );
        verify_offset(
            "daylight_offset_ticks",
            standard_offset_ticks + daylight_delta_ticks,
        )?;
        let zone = DaylightRuleZone {
            id: ZoneId::new(id),
            standard_offset_ticks,
            daylight_delta_ticks,
            start,
            end,
        };
        zone.verify_transitions()?;
        Ok(zone)
    }

    /// Checks that the skipped and repeated readings of every year are
    /// disjoint, at least one daylight delta apart, and that daylight time
    /// spans the new year either in every year or in none. The calendar
    /// repeats every 400 years, so one cycle covers the whole range.
    fn verify_transitions(&self) -> Result<()> {
        let min_distance = 2 * self.daylight_delta_ticks;
        let spans = self.spans_new_year(&self.transitions(1));
        for year in 1..=400 {
            let t = self.transitions(year);
            if (t.gap_start - t.overlap_end).abs() < min_distance {
                return Err(Error::out_of_range(
                    "end",
                    format!("daylight saving starts and ends too close together in year {year}"),
                ));
            }
            if self.spans_new_year(&t) != spans {
                return Err(Error::out_of_range(
                    "end",
                    format!("daylight saving start and end change order in year {year}"),
                ));
            }
        }
        Ok(())
    }

    /// US Eastern time as observed since 2007: UTC-5, daylight saving from the
    /// second Sunday of March 02:00 to the first Sunday of November 02:00.
    pub fn us_eastern() -> DaylightRuleZone {
        DaylightRuleZone {
            id: ZoneId::new("America/New_York"),
            standard_offset_ticks: -5 * TICKS_PER_HOUR,
            daylight_delta_ticks: TICKS_PER_HOUR,
            start: TransitionRule {
                month: 3,
                week: 2,
                day_of_week: DayOfWeek::Sunday,
                time_of_day_ticks: 2 * TICKS_PER_HOUR,
            },
            end: TransitionRule {
                month: 11,
                week: 1,
                day_of_week: DayOfWeek::Sunday,
                time_of_day_ticks: 2 * TICKS_PER_HOUR,
            },
        }
    }

    /// Central European time: UTC+1, daylight saving from the last Sunday of
    /// March 02:00 to the last Sunday of October 03:00.
    pub fn central_european() -> DaylightRuleZone {
        DaylightRuleZone {
            id: ZoneId::new("Europe/Berlin"),
            standard_offset_ticks: TICKS_PER_HOUR,
            daylight_delta_ticks: TICKS_PER_HOUR,
            start: TransitionRule {
                month: 3,
                week: 5,
                day_of_week: DayOfWeek::Sunday,
                time_of_day_ticks: 2 * TICKS_PER_HOUR,
            },
            end: TransitionRule {
                month: 10,
                week: 5,
                day_of_week: DayOfWeek::Sunday,
                time_of_day_ticks: 3 * TICKS_PER_HOUR,
            },
        }
    }

    pub fn standard_offset_ticks(&self) -> i64 {
        self.standard_offset_ticks
    }

    pub fn daylight_offset_ticks(&self) -> i64 {
        self.standard_offset_ticks + self.daylight_delta_ticks
    }

    fn transitions(&self, year: i32) -> YearTransitions {
        let gap_start = self.start.local_ticks(year);
        let overlap_end = self.end.local_ticks(year);
        YearTransitions {
            gap_start,
            overlap_start: overlap_end - self.daylight_delta_ticks,
            overlap_end,
        }
    }

    fn spans_new_year(&self, t: &YearTransitions) -> bool {
        t.gap_start > t.overlap_end
    }
}

fn year_of(ticks: i64) -> i32 {
    calendar::ticks_to_date_parts(ticks.clamp(0, MAX_TICKS)).0
}

impl TimeZoneProvider for DaylightRuleZone {
    fn utc_offset_for_instant(&self, utc: Instant) -> UtcOffset {
        let standard_local = utc.ticks() + self.standard_offset_ticks;
        let t = self.transitions(year_of(standard_local));

        // daylight starts at the standard reading gap_start and ends at the
        // daylight reading overlap_end
        let daylight_local = standard_local + self.daylight_delta_ticks;
        let after_start = standard_local >= t.gap_start;
        let before_end = daylight_local < t.overlap_end;
        let is_daylight = if self.spans_new_year(&t) {
            after_start || before_end
        } else {
            after_start && before_end
        };

        if is_daylight {
            UtcOffset {
                offset_ticks: self.daylight_offset_ticks(),
                is_ambiguous: (t.overlap_start..t.overlap_end).contains(&daylight_local),
            }
        } else {
            UtcOffset::unique(self.standard_offset_ticks)
        }
    }

    fn utc_offset_for_local_reading(&self, local: Instant) -> LocalOffset {
        let reading = local.ticks();
        let t = self.transitions(year_of(reading));

        if (t.gap_start..t.gap_start + self.daylight_delta_ticks).contains(&reading) {
            return LocalOffset {
                offset_ticks: self.standard_offset_ticks,
                status: LocalReadingStatus::Invalid,
            };
        }
        if (t.overlap_start..t.overlap_end).contains(&reading) {
            return LocalOffset {
                offset_ticks: self.standard_offset_ticks,
                status: LocalReadingStatus::Ambiguous {
                    daylight_offset_ticks: self.daylight_offset_ticks(),
                },
            };
        }

        let after_start = reading >= t.gap_start;
        let before_end = reading < t.overlap_end;
        let is_daylight = if self.spans_new_year(&t) {
            after_start || before_end
        } else {
            after_start && before_end
        };
        if is_daylight {
            LocalOffset::unique(self.daylight_offset_ticks())
        } else {
            LocalOffset::unique(self.standard_offset_ticks)
        }
    }

    fn identity(&self) -> ZoneId {
        self.id.clone()
    }
}
