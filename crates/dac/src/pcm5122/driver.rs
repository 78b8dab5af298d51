//! PCM5122 control-plane driver
//!
//! Brings the chip up (interface format, clock tree) and controls per-channel
//! digital volume and mute. Audio samples travel over I²S and never pass
//! through this driver.
//!
//! # I²C Address
//!
//! | ADR2 | ADR1 | Address |
//! |------|------|---------|
//! | 0    | 0    | `0x4C`  |
//! | 0    | 1    | `0x4D`  |
//! | 1    | 0    | `0x4E`  |
//! | 1    | 1    | `0x4F`  |
//!
//! # Mute
//!
//! The chip's soft-mute register covers both channels in one byte, so mute is
//! applied through each channel's own digital volume register instead: code
//! `0xFF` mutes, the 0 dB code `0x30` unmutes.
//!
//! The previous volume is not remembered: after unmuting, a channel plays at
//! 0 dB until [`set_volume`](DacControl::set_volume) is called again.

use embedded_hal::i2c::I2c;
use platform::{Channel, DacControl, I2cRegisterBus, MuteState, RegisterBus, Volume};

use super::access::RegisterAccess;
use super::clock_tree::apply_clock_plan;
use super::register_map::{Page, Register, RegisterDump};
use super::registers::{DIGITAL_VOLUME_2, DIGITAL_VOLUME_3, I2S_1};
use crate::config::DacConfig;
use crate::error::DacError;

/// PCM5122 driver over any [`RegisterBus`].
pub struct Pcm5122<B> {
    access: RegisterAccess<B>,
    config: DacConfig,
    initialized: bool,
}

impl<I: I2c> Pcm5122<I2cRegisterBus<I>> {
    /// Driver talking to `i2c` at `config.i2c_address`.
    pub fn new_i2c(i2c: I, config: DacConfig) -> Self {
        Self::with_config(I2cRegisterBus::new(i2c, config.i2c_address), config)
    }
}

impl<B: RegisterBus> Pcm5122<B> {
    /// Driver with the default 44.1 kHz configuration.
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, DacConfig::default())
    }

    /// Driver with an explicit configuration.
    pub fn with_config(bus: B, config: DacConfig) -> Self {
        Self {
            access: RegisterAccess::new(bus),
            config,
            initialized: false,
        }
    }

    /// Configuration used by [`initialize`](DacControl::initialize).
    pub fn config(&self) -> &DacConfig {
        &self.config
    }

    /// `true` once an initialization has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register access layer (shadow values, current page).
    pub fn access(&self) -> &RegisterAccess<B> {
        &self.access
    }

    /// Diagnostic register dump with the values written so far.
    pub fn dump(&self) -> RegisterDump<'_> {
        self.access.dump()
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.access.release()
    }

    fn volume_register(channel: Channel) -> Register {
        match channel {
            Channel::Left => DIGITAL_VOLUME_2,
            Channel::Right => DIGITAL_VOLUME_3,
        }
    }

    fn ensure_initialized(&self) -> Result<(), DacError> {
        if self.initialized {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("PCM5122 channel control before initialization");
            Err(DacError::NotInitialized)
        }
    }
}

impl<B: RegisterBus> DacControl for Pcm5122<B> {
    type Error = DacError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("Initialising PCM5122 DAC");

        self.initialized = false;

        // Refuse plans the PLL cannot lock on before touching the chip
        self.config.validate().map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("PCM5122 clock plan rejected: {}", e);
            DacError::InvalidClockPlan(e)
        })?;

        self.access.select_page(Page::Zero)?;

        // I²S, 32-bit unless configured otherwise
        self.access.write(I2S_1, self.config.format.register_value())?;

        apply_clock_plan(&mut self.access, &self.config.clock_plan)?;

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("PCM5122 initialisation complete");
        Ok(())
    }

    fn set_volume(&mut self, channel: Channel, level: u8) -> Result<(), Self::Error> {
        let volume = Volume::try_new(level).map_err(|_| DacError::VolumeOutOfRange { level })?;
        self.ensure_initialized()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("volume {} <- {=u8:#x}", channel, volume.code());

        self.access.write(Self::volume_register(channel), volume.code())
    }

    /// Unmute writes 0 dB (`0x30`) and overwrites any earlier volume code.
    fn set_mute(&mut self, channel: Channel, state: MuteState) -> Result<(), Self::Error> {
        self.ensure_initialized()?;

        let code = match state {
            MuteState::Muted => Volume::MUTE_CODE,
            MuteState::Unmuted => Volume::UNITY.code(),
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("mute {} {}", channel, state);

        self.access.write(Self::volume_register(channel), code)
    }
}
