//! PCM5122 clock tree: PLL coefficients and the divider chain.
//!
//! # Clock Tree
//!
//! ```text
//!   BCK (2.8224 MHz) ─ PLL_REF ─> ÷P ─> ×J.D ─> ×R ─> PLLCK (90.3168 MHz)
//!                                                       │
//!                                  ┌────────────────────┤
//!                                  │                    DAC_REF
//!                           ÷DSP (2)                    │
//!                                  │             ÷DAC (16) = DACCK (5.6448 MHz)
//!                      DSPCK (45.1584 MHz)              ├─ ÷NCP (4) = CPCK  (1.4112 MHz)
//!                                                       └─ ÷OSR (8) = OSRCK (705.6 kHz)
//! ```
//!
//! # PLL Formula
//!
//! ```text
//!   PLLCK = PLLCKIN × (J + D / 10 000) × R / P
//! ```
//!
//! PLLCKIN / P must stay within 1–20 MHz (6.667–20 MHz when D ≠ 0), and
//! PLLCK within 64–100 MHz. The DSP clock may not exceed 50 MHz.
//!
//! # Encoding
//!
//! P, R and all four dividers are stored in a [`ClockPlan`] as the ratio the
//! hardware should apply. The `ratio − 1` register encoding happens only in
//! [`DivideRatio::register_value`], when the plan is rendered into writes.
//!
//! # Sequence
//!
//! [`apply_clock_plan`] writes twelve registers in a fixed order
//! ([`ClockTreeStep::ALL`]). The PLL is enabled only after every coefficient
//! has been written. A transport failure after the first write leaves a
//! half-configured clock tree; that is reported as
//! [`DacError::ClockTreePartiallyConfigured`] and callers must restart the
//! whole sequence.

use platform::RegisterBus;

use super::access::RegisterAccess;
use super::register_map::Register;
use super::registers::{self, PLL_D_HIGH_MASK};
use crate::error::DacError;

/// Integer clock divide ratio, 1..=128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DivideRatio(u8);

impl DivideRatio {
    /// Largest ratio a 7-bit divider field can encode.
    pub const MAX: u8 = 128;

    /// Ratio `ratio`, or `None` outside 1..=128.
    pub const fn new(ratio: u8) -> Option<Self> {
        if ratio == 0 || ratio > Self::MAX {
            None
        } else {
            Some(Self(ratio))
        }
    }

    /// The divide ratio the hardware applies.
    pub const fn ratio(self) -> u8 {
        self.0
    }

    /// Value programmed into the divider register: `ratio − 1`.
    pub const fn register_value(self) -> u8 {
        // ratio >= 1 by construction
        self.0.saturating_sub(1)
    }
}

/// PLL reference clock, PLL_REF bits \[6:4\].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllReference {
    /// System clock input
    Sck,
    /// Audio bit clock
    Bck,
    /// GPIO pin selected by GPIO_PLLIN
    Gpio,
}

impl PllReference {
    /// Register value for PLL_REF.
    pub const fn register_value(self) -> u8 {
        match self {
            Self::Sck => registers::SREF_SCK,
            Self::Bck => registers::SREF_BCK,
            Self::Gpio => registers::SREF_GPIO,
        }
    }
}

/// DAC clock source, DAC_REF bits \[6:4\].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacClockSource {
    /// Master clock (PLL output once the PLL is enabled)
    MasterClock,
    /// PLL output
    Pll,
    /// System clock input
    Sck,
    /// Audio bit clock
    Bck,
    /// GPIO pin selected by GPIO_DACIN
    Gpio,
}

impl DacClockSource {
    /// Register value for DAC_REF.
    pub const fn register_value(self) -> u8 {
        match self {
            Self::MasterClock => registers::SDAC_MASTER,
            Self::Pll => registers::SDAC_PLL,
            Self::Sck => registers::SDAC_SCK,
            Self::Bck => registers::SDAC_BCK,
            Self::Gpio => registers::SDAC_GPIO,
        }
    }
}

/// PLL coefficients: `PLLCK = PLLCKIN × (J + D / 10 000) × R / P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllCoefficients {
    /// Pre-divider, 1..=15
    pub p: DivideRatio,
    /// Integer multiplier, 1..=63
    pub j: u8,
    /// Fractional multiplier × 10 000, 0..=9999
    pub d: u16,
    /// Post-multiplier, 1..=16
    pub r: DivideRatio,
}

impl PllCoefficients {
    /// D bits \[13:8\].
    #[allow(clippy::cast_possible_truncation)] // masked to 6 bits
    pub const fn d_high(self) -> u8 {
        (self.d >> 8) as u8 & PLL_D_HIGH_MASK
    }

    /// D bits \[7:0\].
    #[allow(clippy::cast_possible_truncation)] // intentional low byte
    pub const fn d_low(self) -> u8 {
        (self.d & 0xFF) as u8
    }
}

/// One write of the clock-tree sequence, in programming order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockTreeStep {
    /// PLL reference select
    PllReference,
    /// PLL J
    PllJ,
    /// PLL D high byte
    PllDHigh,
    /// PLL D low byte
    PllDLow,
    /// PLL R − 1
    PllR,
    /// PLL P − 1
    PllP,
    /// PLL enable (PLL becomes master clock)
    PllEnable,
    /// DSP clock divider
    DspDivider,
    /// DAC clock source select
    DacSource,
    /// DAC clock divider
    DacDivider,
    /// Charge-pump clock divider
    NcpDivider,
    /// Oversampling clock divider
    OsrDivider,
}

impl ClockTreeStep {
    /// Every step in programming order.
    pub const ALL: [ClockTreeStep; 12] = [
        Self::PllReference,
        Self::PllJ,
        Self::PllDHigh,
        Self::PllDLow,
        Self::PllR,
        Self::PllP,
        Self::PllEnable,
        Self::DspDivider,
        Self::DacSource,
        Self::DacDivider,
        Self::NcpDivider,
        Self::OsrDivider,
    ];

    /// 1-based position in the sequence.
    pub const fn number(self) -> u8 {
        match self {
            Self::PllReference => 1,
            Self::PllJ => 2,
            Self::PllDHigh => 3,
            Self::PllDLow => 4,
            Self::PllR => 5,
            Self::PllP => 6,
            Self::PllEnable => 7,
            Self::DspDivider => 8,
            Self::DacSource => 9,
            Self::DacDivider => 10,
            Self::NcpDivider => 11,
            Self::OsrDivider => 12,
        }
    }

    /// Register this step writes.
    pub const fn register(self) -> Register {
        match self {
            Self::PllReference => registers::PLL_REF,
            Self::PllJ => registers::PLL_COEFF_1,
            Self::PllDHigh => registers::PLL_COEFF_2,
            Self::PllDLow => registers::PLL_COEFF_3,
            Self::PllR => registers::PLL_COEFF_4,
            Self::PllP => registers::PLL_COEFF_0,
            Self::PllEnable => registers::PLL_EN,
            Self::DspDivider => registers::DSP_CLKDIV,
            Self::DacSource => registers::DAC_REF,
            Self::DacDivider => registers::DAC_CLKDIV,
            Self::NcpDivider => registers::NCP_CLKDIV,
            Self::OsrDivider => registers::OSR_CLKDIV,
        }
    }
}

/// Complete clock configuration for one reference frequency.
///
/// A different reference needs a different `ClockPlan` value, never
/// different control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockPlan {
    /// PLL reference clock
    pub reference: PllReference,
    /// PLL coefficients
    pub pll: PllCoefficients,
    /// PLLCK → DSPCK
    pub dsp_divider: DivideRatio,
    /// DAC clock source
    pub dac_source: DacClockSource,
    /// DAC clock source → DACCK
    pub dac_divider: DivideRatio,
    /// DACCK → CPCK
    pub ncp_divider: DivideRatio,
    /// DACCK → OSRCK
    pub osr_divider: DivideRatio,
}

impl ClockPlan {
    /// 44.1 kHz, 32-bit I²S: BCK = 2.8224 MHz.
    ///
    /// - PLLCK = 2.8224 MHz × 16.0 × 2 / 1 = 90.3168 MHz
    /// - DSPCK = PLLCK / 2 = 45.1584 MHz
    /// - DACCK = PLLCK / 16 = 5.6448 MHz
    /// - CPCK  = DACCK / 4 = 1.4112 MHz
    /// - OSRCK = DACCK / 8 = 705.6 kHz
    pub const BCK_2_8224_MHZ: Self = Self {
        reference: PllReference::Bck,
        pll: PllCoefficients {
            p: DivideRatio(1),
            j: 16,
            d: 0,
            r: DivideRatio(2),
        },
        dsp_divider: DivideRatio(2),
        dac_source: DacClockSource::Pll,
        dac_divider: DivideRatio(16),
        ncp_divider: DivideRatio(4),
        osr_divider: DivideRatio(8),
    };

    /// The plan rendered into register values, in programming order.
    pub fn writes(&self) -> [(ClockTreeStep, u8); 12] {
        ClockTreeStep::ALL.map(|step| (step, self.value_for(step)))
    }

    fn value_for(&self, step: ClockTreeStep) -> u8 {
        match step {
            ClockTreeStep::PllReference => self.reference.register_value(),
            ClockTreeStep::PllJ => self.pll.j,
            ClockTreeStep::PllDHigh => self.pll.d_high(),
            ClockTreeStep::PllDLow => self.pll.d_low(),
            ClockTreeStep::PllR => self.pll.r.register_value(),
            ClockTreeStep::PllP => self.pll.p.register_value(),
            ClockTreeStep::PllEnable => registers::PLL_ENABLE,
            ClockTreeStep::DspDivider => self.dsp_divider.register_value(),
            ClockTreeStep::DacSource => self.dac_source.register_value(),
            ClockTreeStep::DacDivider => self.dac_divider.register_value(),
            ClockTreeStep::NcpDivider => self.ncp_divider.register_value(),
            ClockTreeStep::OsrDivider => self.osr_divider.register_value(),
        }
    }

    /// Derived frequencies for a PLL reference of `reference_hz`.
    ///
    /// Only PLL-fed DAC clocks are derivable; external DAC sources have no
    /// known frequency here.
    pub fn frequencies(&self, reference_hz: u32) -> Result<ClockFrequencies, ClockPlanError> {
        if reference_hz == 0 {
            return Err(ClockPlanError::ZeroReference);
        }
        let reference = u64::from(reference_hz);
        let p = u64::from(self.pll.p.ratio());
        let r = u64::from(self.pll.r.ratio());
        let jd = u64::from(self.pll.j)
            .checked_mul(10_000)
            .and_then(|j| j.checked_add(u64::from(self.pll.d)))
            .ok_or(ClockPlanError::Overflow)?;

        let pll_in = reference.checked_div(p).ok_or(ClockPlanError::Overflow)?;
        let pll_out = reference
            .checked_mul(jd)
            .and_then(|v| v.checked_mul(r))
            .and_then(|v| v.checked_div(p.checked_mul(10_000)?))
            .ok_or(ClockPlanError::Overflow)?;

        let dac_in = match self.dac_source {
            DacClockSource::Pll | DacClockSource::MasterClock => pll_out,
            DacClockSource::Sck | DacClockSource::Bck | DacClockSource::Gpio => {
                return Err(ClockPlanError::ExternalDacSource)
            }
        };
        let div = |hz: u64, d: DivideRatio| hz.checked_div(u64::from(d.ratio()));
        let dsp = div(pll_out, self.dsp_divider).ok_or(ClockPlanError::Overflow)?;
        let dac = div(dac_in, self.dac_divider).ok_or(ClockPlanError::Overflow)?;
        let ncp = div(dac, self.ncp_divider).ok_or(ClockPlanError::Overflow)?;
        let osr = div(dac, self.osr_divider).ok_or(ClockPlanError::Overflow)?;

        Ok(ClockFrequencies {
            pll_input_hz: pll_in,
            pll_output_hz: pll_out,
            dsp_hz: dsp,
            dac_hz: dac,
            ncp_hz: ncp,
            osr_hz: osr,
        })
    }

    /// Check that P, J, D and R fit their register fields.
    ///
    /// Independent of the reference frequency. Divider ratios always fit by
    /// construction of [`DivideRatio`].
    pub fn check_coefficients(&self) -> Result<(), ClockPlanError> {
        let pll = &self.pll;
        if pll.p.ratio() > 15 {
            return Err(ClockPlanError::CoefficientOutOfRange { name: "P" });
        }
        if !(1..=63).contains(&pll.j) {
            return Err(ClockPlanError::CoefficientOutOfRange { name: "J" });
        }
        if pll.d > 9999 {
            return Err(ClockPlanError::CoefficientOutOfRange { name: "D" });
        }
        if pll.r.ratio() > 16 {
            return Err(ClockPlanError::CoefficientOutOfRange { name: "R" });
        }
        Ok(())
    }

    /// Check coefficient ranges and clock-domain limits for `reference_hz`.
    pub fn validate(&self, reference_hz: u32) -> Result<ClockFrequencies, ClockPlanError> {
        self.check_coefficients()?;

        let f = self.frequencies(reference_hz)?;
        let min_in = if self.pll.d == 0 { PLL_INPUT_MIN_HZ } else { PLL_INPUT_MIN_FRAC_HZ };
        if !(min_in..=PLL_INPUT_MAX_HZ).contains(&f.pll_input_hz) {
            return Err(ClockPlanError::PllInputOutOfRange { hz: f.pll_input_hz });
        }
        if !(PLL_OUTPUT_MIN_HZ..=PLL_OUTPUT_MAX_HZ).contains(&f.pll_output_hz) {
            return Err(ClockPlanError::PllOutputOutOfRange { hz: f.pll_output_hz });
        }
        if f.dsp_hz > DSP_CLOCK_MAX_HZ {
            return Err(ClockPlanError::DspClockTooFast { hz: f.dsp_hz });
        }
        Ok(f)
    }
}

impl Default for ClockPlan {
    fn default() -> Self {
        Self::BCK_2_8224_MHZ
    }
}

/// PLL input after P, minimum with D = 0.
pub const PLL_INPUT_MIN_HZ: u64 = 1_000_000;
/// PLL input after P, minimum with D ≠ 0.
pub const PLL_INPUT_MIN_FRAC_HZ: u64 = 6_667_000;
/// PLL input after P, maximum.
pub const PLL_INPUT_MAX_HZ: u64 = 20_000_000;
/// PLL output, minimum.
pub const PLL_OUTPUT_MIN_HZ: u64 = 64_000_000;
/// PLL output, maximum.
pub const PLL_OUTPUT_MAX_HZ: u64 = 100_000_000;
/// DSP clock, maximum.
pub const DSP_CLOCK_MAX_HZ: u64 = 50_000_000;

/// Frequencies produced by a [`ClockPlan`] (integer Hz, truncated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFrequencies {
    /// PLLCKIN / P
    pub pll_input_hz: u64,
    /// PLLCK
    pub pll_output_hz: u64,
    /// DSPCK
    pub dsp_hz: u64,
    /// DACCK
    pub dac_hz: u64,
    /// CPCK
    pub ncp_hz: u64,
    /// OSRCK
    pub osr_hz: u64,
}

/// Reasons a [`ClockPlan`] is unusable for a reference frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPlanError {
    /// Reference frequency is zero
    ZeroReference,
    /// Reference frequency cannot be derived from the configuration
    UnknownReference,
    /// A PLL coefficient is outside its register field
    CoefficientOutOfRange {
        /// Coefficient name (P, J, D or R)
        name: &'static str,
    },
    /// PLLCKIN / P outside the lock range
    PllInputOutOfRange {
        /// Offending frequency
        hz: u64,
    },
    /// PLLCK outside 64–100 MHz
    PllOutputOutOfRange {
        /// Offending frequency
        hz: u64,
    },
    /// DSPCK above 50 MHz
    DspClockTooFast {
        /// Offending frequency
        hz: u64,
    },
    /// DAC clock is fed from an external pin of unknown frequency
    ExternalDacSource,
    /// Arithmetic overflow while deriving frequencies
    Overflow,
}

impl core::fmt::Display for ClockPlanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroReference => write!(f, "PLL reference frequency is zero"),
            Self::UnknownReference => write!(f, "PLL reference frequency unknown"),
            Self::CoefficientOutOfRange { name } => {
                write!(f, "PLL coefficient {name} out of range")
            }
            Self::PllInputOutOfRange { hz } => write!(f, "PLL input {hz} Hz out of range"),
            Self::PllOutputOutOfRange { hz } => write!(f, "PLL output {hz} Hz out of range"),
            Self::DspClockTooFast { hz } => write!(f, "DSP clock {hz} Hz exceeds 50 MHz"),
            Self::ExternalDacSource => write!(f, "DAC clock source frequency unknown"),
            Self::Overflow => write!(f, "clock frequency overflow"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockPlanError {}

/// Program `plan` into the chip through `access`.
///
/// Issues exactly the twelve writes of [`ClockPlan::writes`], in order,
/// stopping at the first transport failure. Only field ranges are checked
/// here; frequency limits need the reference and are checked by
/// [`ClockPlan::validate`].
///
/// # Errors
///
/// - [`DacError::InvalidClockPlan`] if a coefficient does not fit its
///   register field; nothing is written.
/// - [`DacError::BusWriteFailed`] if the first write fails (nothing changed).
/// - [`DacError::ClockTreePartiallyConfigured`] if a later write fails; the
///   field names the last step that did reach the chip.
pub fn apply_clock_plan<B: RegisterBus>(
    access: &mut RegisterAccess<B>,
    plan: &ClockPlan,
) -> Result<(), DacError> {
    plan.check_coefficients().map_err(DacError::InvalidClockPlan)?;

    let mut last_completed: Option<ClockTreeStep> = None;

    for (step, value) in plan.writes() {
        #[cfg(feature = "defmt")]
        defmt::debug!("clock tree step {=u8}: {=u8:#x}", step.number(), value);

        if let Err(err) = access.write(step.register(), value) {
            return Err(match last_completed {
                None => err,
                Some(last_completed_step) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "clock tree aborted after step {=u8}",
                        last_completed_step.number()
                    );
                    DacError::ClockTreePartiallyConfigured {
                        last_completed_step,
                    }
                }
            });
        }
        last_completed = Some(step);
    }
    Ok(())
}
