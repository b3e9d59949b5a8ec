//! The 64-bit interchange word.
//!
//! Non-local instants are stored verbatim: the tick field in bits 0..=61 and
//! the kind tag in bits 62..=63.
//!
//! Local instants are stored as the *UTC* tick count of the reading, tagged
//! with bit 63 only, so that a reader in another zone sees the same moment in
//! its own local time. A UTC tick count that underflows zero is wrapped into
//! the top day below `2^62`. Decoding re-applies the offset of the decoding
//! provider, which makes the local round trip exact only when both sides share
//! an offset regime.

use crate::{
    MAX_TICKS, TICKS_PER_DAY,
    encoding::{self, KIND_LOCAL, Kind, TICKS_CEILING, TICKS_MASK},
    error::Error,
    instant::Instant,
    result::Result,
    time_zone::{self, TimeZoneProvider},
};

impl Instant {
    /// Encodes this instant into its interchange word.
    ///
    /// # Examples
    /// ```rust
    /// # use instant64::{FixedOffsetZone, Instant, Kind};
    /// let zone = FixedOffsetZone::utc();
    /// let dt = Instant::try_from_ymd(2024, 5, 17, Kind::Utc).unwrap();
    /// let word = dt.to_binary_with_provider(&zone);
    /// let back = Instant::from_binary_with_provider(word, &zone).unwrap();
    /// assert!(back.is_identical(&dt));
    /// ```
    pub fn to_binary_with_provider(&self, zone: &impl TimeZoneProvider) -> u64 {
        if self.kind() != Kind::Local {
            return self.word();
        }
        // the offset is bounded to +/-14 hours, so the stored ticks stay
        // clear of the tag bits
        let offset = self.utc_offset_with_provider(zone);
        let mut stored = self.ticks() - offset;
        if stored < 0 {
            stored += TICKS_CEILING;
        }
        log::trace!(
            "encoding local instant {} with offset {offset} from zone {}",
            self.ticks(),
            zone.identity()
        );
        stored as u64 | KIND_LOCAL
    }

    /// Decodes an interchange word produced by
    /// [`to_binary_with_provider`](Instant::to_binary_with_provider).
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) if
    /// the tick field, after any local offset is applied, is not a valid
    /// instant.
    pub fn from_binary_with_provider(word: u64, zone: &impl TimeZoneProvider) -> Result<Instant> {
        if word & KIND_LOCAL == 0 {
            return Instant::from_binary_raw(word);
        }

        let mut ticks = (word & TICKS_MASK) as i64;
        if ticks > TICKS_CEILING - TICKS_PER_DAY {
            ticks -= TICKS_CEILING;
        }

        let mut ambiguous = false;
        let offset = if ticks < 0 {
            time_zone::instant_offset(zone, Instant::min_with_kind(Kind::Utc)).offset_ticks
        } else if ticks > MAX_TICKS {
            time_zone::instant_offset(zone, Instant::max_with_kind(Kind::Utc)).offset_ticks
        } else {
            let offset = time_zone::instant_offset(
                zone,
                Instant::from_ticks_unchecked(ticks, Kind::Utc, false),
            );
            ambiguous = offset.is_ambiguous;
            offset.offset_ticks
        };
        log::trace!(
            "decoding local instant from utc ticks {ticks} with offset {offset} from zone {}",
            zone.identity()
        );

        ticks += offset;
        // small readings wrap around midnight so they stay usable as times of day
        if ticks < 0 {
            ticks += TICKS_PER_DAY;
        }
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(Error::bad_binary_data(word));
        }
        Ok(Instant::from_ticks_unchecked(ticks, Kind::Local, ambiguous))
    }

    /// The verbatim word for any kind, without local adjustment.
    pub const fn to_binary_raw(&self) -> u64 {
        self.word()
    }

    /// Decodes a verbatim word, rejecting tick fields past `MAX_TICKS`.
    pub fn from_binary_raw(word: u64) -> Result<Instant> {
        Ok(Instant::from_word_unchecked(encoding::validate(word)?))
    }

    /// Little-endian bytes of [`to_binary_with_provider`](Instant::to_binary_with_provider).
    pub fn to_le_bytes_with_provider(&self, zone: &impl TimeZoneProvider) -> [u8; 8] {
        self.to_binary_with_provider(zone).to_le_bytes()
    }

    pub fn from_le_bytes_with_provider(
        bytes: [u8; 8],
        zone: &impl TimeZoneProvider,
    ) -> Result<Instant> {
        Instant::from_binary_with_provider(u64::from_le_bytes(bytes), zone)
    }
}
