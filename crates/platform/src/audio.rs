//! Audio DAC control abstraction

use crate::audio_types::{Channel, MuteState};

/// Control-plane operations of a stereo DAC.
///
/// All operations are blocking bus transactions. Callers sharing one DAC
/// between tasks must serialise access themselves.
pub trait DacControl {
    /// Error type
    type Error: core::fmt::Debug;

    /// Bring the chip up: interface format and clock tree.
    ///
    /// A failure leaves the chip unusable; channel operations must not be
    /// attempted until a later call succeeds.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Set the digital volume code of one channel.
    fn set_volume(&mut self, channel: Channel, level: u8) -> Result<(), Self::Error>;

    /// Mute or unmute one channel.
    ///
    /// Implementations may share storage between mute and volume. Unmuting
    /// then restores a fixed level rather than the last
    /// [`set_volume`](Self::set_volume) code, so callers that track a user
    /// volume must re-apply it after unmuting.
    fn set_mute(&mut self, channel: Channel, state: MuteState) -> Result<(), Self::Error>;
}
