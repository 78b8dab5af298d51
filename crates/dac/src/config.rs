//! Compile-time DAC configuration

use platform::{I2cAddresses, InterfaceFormat};

use crate::pcm5122::clock_tree::{ClockFrequencies, ClockPlan, ClockPlanError, PllReference};

/// Everything the initializer needs to bring the PCM5122 up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacConfig {
    /// 7-bit I²C device address
    pub i2c_address: u8,
    /// Audio serial interface format
    pub format: InterfaceFormat,
    /// Sample rate in Hz, used to derive the bit clock
    pub sample_rate_hz: u32,
    /// Clock tree programming
    pub clock_plan: ClockPlan,
    /// Frequency of the SCK or GPIO PLL reference, when the plan uses one.
    ///
    /// Ignored for a BCK reference, whose frequency follows from the format
    /// and sample rate.
    pub external_reference_hz: Option<u32>,
}

impl DacConfig {
    /// PCM5122 at 0x4D, 44.1 kHz 32-bit I²S, PLL fed from BCK.
    ///
    /// Clock derivation:
    /// - BCK = 32 × 2 × 44 100 = 2.8224 MHz
    /// - PLLCK = 90.3168 MHz, DSPCK = 45.1584 MHz
    /// - DACCK = 5.6448 MHz, CPCK = 1.4112 MHz, OSRCK = 705.6 kHz
    pub const fn pcm5122_44k1() -> Self {
        Self {
            i2c_address: I2cAddresses::PCM5122_DAC,
            format: InterfaceFormat::I2S_32BIT,
            sample_rate_hz: 44_100,
            clock_plan: ClockPlan::BCK_2_8224_MHZ,
            external_reference_hz: None,
        }
    }

    /// Frequency feeding the PLL.
    pub fn reference_hz(&self) -> Option<u32> {
        match self.clock_plan.reference {
            PllReference::Bck => self.format.bclk_hz(self.sample_rate_hz),
            PllReference::Sck | PllReference::Gpio => self.external_reference_hz,
        }
    }

    /// Check the clock plan against the reference this configuration implies.
    pub fn validate(&self) -> Result<ClockFrequencies, ClockPlanError> {
        let reference = self.reference_hz().ok_or(ClockPlanError::UnknownReference)?;
        self.clock_plan.validate(reference)
    }
}

impl Default for DacConfig {
    fn default() -> Self {
        Self::pcm5122_44k1()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pcm5122::clock_tree::PllCoefficients;

    #[test]
    fn test_default_is_44k1_at_0x4d() {
        let cfg = DacConfig::default();
        assert_eq!(cfg.i2c_address, 0x4D);
        assert_eq!(cfg.format.register_value(), 0x03);
        assert_eq!(cfg.reference_hz(), Some(2_822_400));
    }

    #[test]
    fn test_default_validates() {
        let f = DacConfig::default().validate().unwrap();
        assert_eq!(f.pll_output_hz, 90_316_800);
        assert_eq!(f.osr_hz, 705_600);
    }

    /// The 44.1 kHz plan tolerates 48 kHz but not 96 kHz.
    #[test]
    fn test_wrong_sample_rate_is_caught() {
        let cfg = DacConfig {
            sample_rate_hz: 48_000,
            ..DacConfig::default()
        };
        assert!(cfg.validate().is_ok(), "98.304 MHz is still within range");

        let cfg = DacConfig {
            sample_rate_hz: 96_000,
            ..DacConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ClockPlanError::PllOutputOutOfRange { .. })
        ));
    }

    #[test]
    fn test_sck_reference_needs_external_frequency() {
        let plan = ClockPlan {
            reference: PllReference::Sck,
            pll: PllCoefficients {
                j: 8,
                ..ClockPlan::BCK_2_8224_MHZ.pll
            },
            ..ClockPlan::BCK_2_8224_MHZ
        };
        let mut cfg = DacConfig {
            clock_plan: plan,
            ..DacConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ClockPlanError::UnknownReference));

        cfg.external_reference_hz = Some(5_644_800);
        assert_eq!(cfg.validate().unwrap().pll_output_hz, 90_316_800);
    }
}
