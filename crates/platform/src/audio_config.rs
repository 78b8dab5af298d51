//! Audio interface configuration for the PCM5122 DAC.
//!
//! Defines the serial audio interface format and the I²C addresses used for
//! DAC control.
//!
//! # Serial audio interface
//!
//! The host drives BCK / LRCK / DATA. The deployment uses one fixed format:
//!
//! ```text
//! I²S, 32-bit words, 2 channels, 44.1 kHz
//!   BCK = 32 × 2 × 44 100 = 2.8224 MHz   (PLL reference)
//! ```
//!
//! # I2C Bus Assignments
//!
//! | Bus  | Peripheral  | Address | ADR2/ADR1 |
//! |------|-------------|---------|-----------|
//! | I2C1 | PCM5122 DAC | 0x4D    | low/high  |

/// Audio data format, I2S_1 register bits \[5:4\] (AFMT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialFormat {
    /// Philips I²S
    I2s,
    /// DSP / TDM
    Dsp,
    /// Right-justified
    RightJustified,
    /// Left-justified
    LeftJustified,
}

impl SerialFormat {
    fn bits(self) -> u8 {
        match self {
            Self::I2s => 0b00 << 4,
            Self::Dsp => 0b01 << 4,
            Self::RightJustified => 0b10 << 4,
            Self::LeftJustified => 0b11 << 4,
        }
    }
}

/// Audio word length, I2S_1 register bits \[1:0\] (ALEN).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordLength {
    /// 16-bit
    Bits16,
    /// 20-bit
    Bits20,
    /// 24-bit
    Bits24,
    /// 32-bit
    Bits32,
}

impl WordLength {
    fn bits(self) -> u8 {
        match self {
            Self::Bits16 => 0b00,
            Self::Bits20 => 0b01,
            Self::Bits24 => 0b10,
            Self::Bits32 => 0b11,
        }
    }

    /// Word length in bits.
    pub fn bit_count(self) -> u8 {
        match self {
            Self::Bits16 => 16,
            Self::Bits20 => 20,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }
}

/// Serial audio interface format written during initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceFormat {
    /// Frame format
    pub format: SerialFormat,
    /// Word length
    pub word_length: WordLength,
}

impl InterfaceFormat {
    /// Deployment format: I²S, 32-bit words (register value `0x03`).
    pub const I2S_32BIT: Self = Self {
        format: SerialFormat::I2s,
        word_length: WordLength::Bits32,
    };

    /// Encoded value for the I2S_1 register.
    pub fn register_value(self) -> u8 {
        self.format.bits() | self.word_length.bits()
    }

    /// Bit clock for a stereo stream at `sample_rate_hz`.
    ///
    /// BCK = word_length × 2 × fs. For 32-bit / 44.1 kHz: 2 822 400 Hz.
    pub fn bclk_hz(self, sample_rate_hz: u32) -> Option<u32> {
        u32::from(self.word_length.bit_count())
            .checked_mul(2)?
            .checked_mul(sample_rate_hz)
    }
}

impl Default for InterfaceFormat {
    fn default() -> Self {
        Self::I2S_32BIT
    }
}

/// I2C addresses for the DAC control port.
///
/// All addresses are 7-bit (the embedded-hal standard convention).
pub struct I2cAddresses;

impl I2cAddresses {
    /// PCM5122 address as strapped on this board (ADR2 low, ADR1 high).
    ///
    /// Wire address: 0x9A (write).
    pub const PCM5122_DAC: u8 = 0x4D;

    /// Lowest PCM512x address (ADR2 = ADR1 = low).
    pub const PCM512X_MIN: u8 = 0x4C;

    /// Highest PCM512x address (ADR2 = ADR1 = high).
    pub const PCM512X_MAX: u8 = 0x4F;
}
