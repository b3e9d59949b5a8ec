//! Conversion between local and universal readings.
//!
//! Conversions never fail. When applying the zone offset would leave the
//! representable range, the result saturates to [`Instant::MIN`] or
//! [`Instant::MAX`] tagged with the target kind.

use crate::{
    MAX_TICKS,
    clock::Clock,
    encoding::Kind,
    instant::Instant,
    time_zone::{self, TimeZoneProvider},
};

/// Clamps `ticks` into range and tags it, logging when saturation kicks in.
fn saturate(ticks: i64, kind: Kind, ambiguous: bool, zone: &impl TimeZoneProvider) -> Instant {
    if ticks > MAX_TICKS {
        log::debug!(
            "conversion to {kind:?} in zone {} overflows by {} ticks, saturating to max",
            zone.identity(),
            ticks - MAX_TICKS
        );
        Instant::max_with_kind(kind)
    } else if ticks < 0 {
        log::debug!(
            "conversion to {kind:?} in zone {} underflows by {} ticks, saturating to min",
            zone.identity(),
            -ticks
        );
        Instant::min_with_kind(kind)
    } else {
        Instant::from_ticks_unchecked(ticks, kind, ambiguous)
    }
}

impl Instant {
    /// Offset, in ticks, between this instant's reading and UTC in `zone`.
    ///
    /// `Utc` instants report zero. `Local` and `Unspecified` instants are
    /// treated as local readings; for an ambiguous reading the instant's
    /// ambiguity flag selects the daylight offset. Offsets the provider
    /// reports beyond +/-14 hours are clamped to that bound.
    pub fn utc_offset_with_provider(&self, zone: &impl TimeZoneProvider) -> i64 {
        match self.kind() {
            Kind::Utc => 0,
            Kind::Local | Kind::Unspecified => {
                time_zone::local_reading_offset(zone, *self).resolve(self.is_ambiguous_dst())
            }
        }
    }

    /// Converts to a `Local` instant.
    ///
    /// `Local` instants are returned unchanged. `Utc` instants are shifted by
    /// the zone offset and flagged when they land on the first occurrence of a
    /// repeated hour. `Unspecified` instants are re-tagged without shifting.
    ///
    /// # Examples
    /// ```rust
    /// # use instant64::{FixedOffsetZone, Instant, Kind, TICKS_PER_HOUR};
    /// let zone = FixedOffsetZone::new("UTC+02", 2 * TICKS_PER_HOUR).unwrap();
    /// let utc = Instant::try_from_ymd_hms(2024, 6, 1, 10, 0, 0, Kind::Utc).unwrap();
    /// let local = utc.to_local_with_provider(&zone);
    /// assert_eq!((local.hour(), local.kind()), (12, Kind::Local));
    /// ```
    pub fn to_local_with_provider(self, zone: &impl TimeZoneProvider) -> Instant {
        match self.kind() {
            Kind::Local => self,
            Kind::Unspecified => self.specify_kind(Kind::Local),
            Kind::Utc => {
                // offsets are bounded to +/-14 hours, far from i64 overflow
                let offset = time_zone::instant_offset(zone, self);
                saturate(
                    self.ticks() + offset.offset_ticks,
                    Kind::Local,
                    offset.is_ambiguous,
                    zone,
                )
            }
        }
    }

    /// Converts to a `Utc` instant.
    ///
    /// `Utc` instants are returned unchanged. `Local` instants are shifted by
    /// the offset of their reading (see
    /// [`utc_offset_with_provider`](Instant::utc_offset_with_provider));
    /// readings in a skipped hour use whatever offset the provider reports.
    /// `Unspecified` instants are re-tagged without shifting.
    pub fn to_utc_with_provider(self, zone: &impl TimeZoneProvider) -> Instant {
        match self.kind() {
            Kind::Utc => self,
            Kind::Unspecified => self.specify_kind(Kind::Utc),
            Kind::Local => {
                let offset = self.utc_offset_with_provider(zone);
                saturate(self.ticks() - offset, Kind::Utc, false, zone)
            }
        }
    }

    /// Current time as a `Utc` instant, clamped into range.
    pub fn now_utc(clock: &impl Clock) -> Instant {
        let ticks = clock.utc_now_ticks().clamp(0, MAX_TICKS);
        Instant::from_ticks_unchecked(ticks, Kind::Utc, false)
    }

    /// Current time as a `Local` instant in `zone`.
    pub fn now_local(clock: &impl Clock, zone: &impl TimeZoneProvider) -> Instant {
        Instant::now_utc(clock).to_local_with_provider(zone)
    }
}
