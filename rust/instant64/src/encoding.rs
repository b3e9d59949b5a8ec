//! Packing of the tick counter and the kind tag into one 64-bit word.
//!
//! Layout:
//!
//! ```text
//!  63  62  61                                                 0
//! +---+---+----------------------------------------------------+
//! | K | A |                      ticks                         |
//! +---+---+----------------------------------------------------+
//! ```
//!
//! | bits 63..62 | meaning              |
//! |-------------|----------------------|
//! | `00`        | Unspecified          |
//! | `01`        | Utc                  |
//! | `10`        | Local                |
//! | `11`        | Local, ambiguous DST |

use crate::{MAX_TICKS, error::Error, result::Result};

pub(crate) const TICKS_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;
pub(crate) const FLAGS_MASK: u64 = 0xC000_0000_0000_0000;

pub(crate) const KIND_UNSPECIFIED: u64 = 0x0000_0000_0000_0000;
pub(crate) const KIND_UTC: u64 = 0x4000_0000_0000_0000;
pub(crate) const KIND_LOCAL: u64 = 0x8000_0000_0000_0000;
pub(crate) const KIND_LOCAL_AMBIGUOUS_DST: u64 = 0xC000_0000_0000_0000;

/// Upper bound (exclusive) of the tick field, `2^62`.
pub(crate) const TICKS_CEILING: i64 = 0x4000_0000_0000_0000;

/// Whether an instant's wall-clock reading is universal, local, or unknown.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Kind {
    #[default]
    Unspecified = 0,
    Utc = 1,
    Local = 2,
}

impl TryFrom<u8> for Kind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Kind::Unspecified),
            1 => Ok(Kind::Utc),
            2 => Ok(Kind::Local),
            _ => Err(Error::invalid_kind(value)),
        }
    }
}

impl From<Kind> for u8 {
    fn from(kind: Kind) -> u8 {
        kind as u8
    }
}

/// Packs ticks and kind into a word.
///
/// The ambiguous flag is dropped unless `kind` is [`Kind::Local`].
pub(crate) fn pack(ticks: i64, kind: Kind, ambiguous: bool) -> Result<u64> {
    if !(0..=MAX_TICKS).contains(&ticks) {
        return Err(Error::ticks_out_of_range());
    }
    Ok(pack_unchecked(ticks, kind, ambiguous))
}

/// Packs ticks that are already known to be in `[0, MAX_TICKS]`.
#[inline]
pub(crate) const fn pack_unchecked(ticks: i64, kind: Kind, ambiguous: bool) -> u64 {
    let flags = match (kind, ambiguous) {
        (Kind::Unspecified, _) => KIND_UNSPECIFIED,
        (Kind::Utc, _) => KIND_UTC,
        (Kind::Local, false) => KIND_LOCAL,
        (Kind::Local, true) => KIND_LOCAL_AMBIGUOUS_DST,
    };
    (ticks as u64) | flags
}

/// Splits a word into `(ticks, kind, ambiguous)`.
///
/// Total over all inputs. The tick field of a foreign word may exceed
/// `MAX_TICKS`; use [`validate`] on decode paths.
#[inline]
pub(crate) const fn unpack(word: u64) -> (i64, Kind, bool) {
    let ticks = (word & TICKS_MASK) as i64;
    match word & FLAGS_MASK {
        KIND_UNSPECIFIED => (ticks, Kind::Unspecified, false),
        KIND_UTC => (ticks, Kind::Utc, false),
        KIND_LOCAL => (ticks, Kind::Local, false),
        _ => (ticks, Kind::Local, true),
    }
}

/// Checks the tick field of a foreign word.
pub(crate) fn validate(word: u64) -> Result<u64> {
    if (word & TICKS_MASK) as i64 > MAX_TICKS {
        return Err(Error::bad_binary_data(word));
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(pack(5, Kind::Unspecified, false).unwrap(), 5);
        assert_eq!(pack(5, Kind::Utc, false).unwrap(), 5 | (1 << 62));
        assert_eq!(pack(5, Kind::Local, false).unwrap(), 5 | (1 << 63));
        assert_eq!(pack(5, Kind::Local, true).unwrap(), 5 | (3 << 62));
        assert_eq!(KIND_LOCAL >> 62, 2);
    }

    #[test]
    fn test_ambiguous_flag_only_for_local() {
        assert_eq!(pack(7, Kind::Utc, true).unwrap(), pack(7, Kind::Utc, false).unwrap());
        assert_eq!(
            pack(7, Kind::Unspecified, true).unwrap(),
            pack(7, Kind::Unspecified, false).unwrap()
        );
        let (_, kind, ambiguous) = unpack(pack(7, Kind::Utc, true).unwrap());
        assert_eq!(kind, Kind::Utc);
        assert!(!ambiguous);
    }

    #[test]
    fn test_pack_rejects_out_of_range_ticks() {
        assert!(pack(-1, Kind::Utc, false).unwrap_err().is_out_of_range());
        assert!(pack(MAX_TICKS + 1, Kind::Utc, false).is_err());
        assert!(pack(MAX_TICKS, Kind::Local, true).is_ok());
    }

    #[test]
    fn test_unpack_is_total() {
        for word in [0u64, u64::MAX, TICKS_MASK, FLAGS_MASK, KIND_UTC | 42] {
            let (ticks, _, _) = unpack(word);
            assert!((0..TICKS_CEILING).contains(&ticks));
        }
        let (ticks, kind, ambiguous) = unpack(KIND_LOCAL_AMBIGUOUS_DST | 42);
        assert_eq!((ticks, kind, ambiguous), (42, Kind::Local, true));
    }

    #[test]
    fn test_validate_rejects_ticks_past_max() {
        assert!(validate(MAX_TICKS as u64).is_ok());
        assert!(validate(KIND_UTC | (MAX_TICKS as u64 + 1)).is_err());
        assert!(validate(u64::MAX).is_err());
    }

    #[test]
    fn test_kind_from_u8() {
        assert_eq!(Kind::try_from(0).unwrap(), Kind::Unspecified);
        assert_eq!(Kind::try_from(1).unwrap(), Kind::Utc);
        assert_eq!(Kind::try_from(2).unwrap(), Kind::Local);
        let err = Kind::try_from(3).unwrap_err();
        assert_eq!(err.into_kind(), crate::ErrorKind::InvalidKind { value: 3 });
        assert_eq!(u8::from(Kind::Local), 2);
    }
}
