//! DAC control-plane errors

use crate::pcm5122::clock_tree::{ClockPlanError, ClockTreeStep};

/// Errors returned by the PCM5122 control plane.
///
/// Every failure is reported exactly once, as the return value of the call
/// that caused it. Nothing is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacError {
    /// Register name not present in the register map
    UnknownRegister,
    /// Clock plan rejected before any bus write
    InvalidClockPlan(ClockPlanError),
    /// Bus transaction rejected by the transport
    BusWriteFailed {
        /// Register address of the failed write
        address: u8,
    },
    /// Clock tree programming stopped part way; re-run initialization
    ClockTreePartiallyConfigured {
        /// Last step whose write reached the chip
        last_completed_step: ClockTreeStep,
    },
    /// Volume code outside 0x00..=0xFE
    VolumeOutOfRange {
        /// Rejected code
        level: u8,
    },
    /// Channel control before a successful initialization
    NotInitialized,
}

impl core::fmt::Display for DacError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownRegister => write!(f, "unknown register name"),
            Self::InvalidClockPlan(e) => write!(f, "invalid clock plan: {e}"),
            Self::BusWriteFailed { address } => {
                write!(f, "bus write to register 0x{address:02X} failed")
            }
            Self::ClockTreePartiallyConfigured {
                last_completed_step,
            } => write!(
                f,
                "clock tree partially configured (last completed step {})",
                last_completed_step.number()
            ),
            Self::VolumeOutOfRange { level } => {
                write!(f, "volume code 0x{level:02X} outside 0x00..=0xFE")
            }
            Self::NotInitialized => write!(f, "DAC not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DacError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidClockPlan(e) => Some(e),
            _ => None,
        }
    }
}
