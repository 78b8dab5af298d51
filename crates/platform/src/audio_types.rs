//! Audio domain newtypes for compile-time safety.
//!
//! - `Channel` / `MuteState`: closed selectors, no hidden defaults
//! - `Volume`: PCM5122 digital volume code, rejects the reserved mute code
//! - `OutOfRangeError`: shared range-violation error

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: i32,
    /// The inclusive minimum allowed value.
    pub min: i32,
    /// The inclusive maximum allowed value.
    pub max: i32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside valid range {}..={}",
            self.value, self.min, self.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

// ── Channel / MuteState ──────────────────────────────────────────────────────

/// Output channel of the stereo DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Left channel
    Left,
    /// Right channel
    Right,
}

impl Channel {
    /// Both channels, left first.
    pub const ALL: [Channel; 2] = [Channel::Left, Channel::Right];
}

/// Digital mute state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuteState {
    /// Output silenced
    Muted,
    /// Output passes audio
    Unmuted,
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// PCM5122 digital volume code.
///
/// The chip applies 0.5 dB per step:
/// - `0x00` → +24 dB (maximum gain)
/// - `0x30` → 0 dB (reset default)
/// - `0xFE` → −103 dB (minimum gain)
///
/// `0xFF` is the chip's digital mute code. It is not a volume level and is
/// only ever written through a mute operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Volume(u8);

impl Volume {
    /// Loudest level: +24 dB.
    pub const MAX_GAIN: Volume = Volume(0x00);

    /// Unity gain (0 dB), the chip's reset value.
    pub const UNITY: Volume = Volume(0x30);

    /// Quietest non-muted level: −103 dB.
    pub const MIN_GAIN: Volume = Volume(0xFE);

    /// Register code that silences the channel.
    pub const MUTE_CODE: u8 = 0xFF;

    /// Create a `Volume` from a raw register code.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for the reserved mute code `0xFF`.
    pub fn try_new(code: u8) -> Result<Self, OutOfRangeError> {
        if code > Self::MIN_GAIN.0 {
            Err(OutOfRangeError {
                value: i32::from(code),
                min: i32::from(Self::MAX_GAIN.0),
                max: i32::from(Self::MIN_GAIN.0),
            })
        } else {
            Ok(Self(code))
        }
    }

    /// Create a `Volume` from a gain in half-decibel units.
    ///
    /// `48` is +24 dB, `0` is 0 dB, `-206` is −103 dB.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] outside `-206..=48`.
    pub fn from_gain_half_db(half_db: i16) -> Result<Self, OutOfRangeError> {
        let out_of_range = OutOfRangeError {
            value: i32::from(half_db),
            min: -206,
            max: 48,
        };
        let code = i16::from(Self::UNITY.0)
            .checked_sub(half_db)
            .and_then(|c| u8::try_from(c).ok())
            .ok_or(out_of_range)?;
        Self::try_new(code).map_err(|_| out_of_range)
    }

    /// Return the raw register code.
    pub fn code(self) -> u8 {
        self.0
    }

    /// Gain in half-decibel units (`48` = +24 dB, `-206` = −103 dB).
    #[allow(clippy::arithmetic_side_effects)] // both operands ≤ 0xFE, fits i16
    pub fn gain_half_db(self) -> i16 {
        i16::from(Self::UNITY.0) - i16::from(self.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::UNITY
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unity_is_reset_code() {
        assert_eq!(Volume::default().code(), 0x30);
        assert_eq!(Volume::UNITY.gain_half_db(), 0);
    }

    #[test]
    fn mute_code_is_rejected_as_volume() {
        let err = Volume::try_new(Volume::MUTE_CODE).unwrap_err();
        assert_eq!(err.value, 255);
        assert_eq!(err.max, 254);
    }

    #[test]
    fn gain_extremes_map_to_code_extremes() {
        assert_eq!(Volume::from_gain_half_db(48).unwrap(), Volume::MAX_GAIN);
        assert_eq!(Volume::from_gain_half_db(-206).unwrap(), Volume::MIN_GAIN);
        assert!(Volume::from_gain_half_db(49).is_err());
        assert!(Volume::from_gain_half_db(-207).is_err());
    }

    #[test]
    fn minus_six_db_is_twelve_steps_below_unity() {
        assert_eq!(Volume::from_gain_half_db(-12).unwrap().code(), 0x3C);
    }

    #[test]
    fn out_of_range_error_displays_bounds() {
        let err = Volume::try_new(0xFF).unwrap_err();
        assert_eq!(err.to_string(), "value 255 outside valid range 0..=254");
    }
}
