//! Hardware abstraction layer for the PCM5122 control plane
//!
//! This crate provides the trait seams and domain newtypes shared by the DAC
//! driver and its consumers, so the driver can be exercised without hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application (bring-up, volume UI)
//!         ↓
//! DAC driver (dac crate: register map, clock tree, channel control)
//!         ↓
//! Platform HAL (this crate: RegisterBus, DacControl, newtypes)
//!         ↓
//! Transport (any embedded_hal::i2c::I2c implementation)
//! ```
//!
//! # Features
//!
//! - `std`: implement `std::error::Error` for error types
//! - `defmt`: derive `defmt::Format` on all public types
//!
//! # Example
//!
//! ```no_run
//! use platform::{Channel, DacControl, MuteState};
//!
//! fn silence<D: DacControl>(dac: &mut D) -> Result<(), D::Error> {
//!     dac.set_mute(Channel::Left, MuteState::Muted)?;
//!     dac.set_mute(Channel::Right, MuteState::Muted)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod audio_config;
pub mod audio_types;
pub mod bus;

// Re-export main high-level traits
pub use audio::DacControl;
pub use bus::{I2cRegisterBus, RegisterBus};

// Re-export domain types
pub use audio_config::{I2cAddresses, InterfaceFormat, SerialFormat, WordLength};
pub use audio_types::{Channel, MuteState, OutOfRangeError, Volume};
