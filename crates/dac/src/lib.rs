//! PCM5122 DAC control plane
//!
//! Configures a TI PCM5122 over I²C: register map, page-aware register
//! access, clock tree, audio interface bring-up and per-channel volume and
//! mute.
//!
//! # Example
//!
//! ```
//! use dac::mock::MockBus;
//! use dac::Pcm5122;
//! use platform::{Channel, DacControl, MuteState};
//!
//! let mut dac = Pcm5122::new(MockBus::new());
//! dac.initialize()?;
//! dac.set_volume(Channel::Left, 0x30)?;
//! dac.set_mute(Channel::Right, MuteState::Muted)?;
//! assert_eq!(dac.release().writes().len(), 16);
//! # Ok::<(), dac::DacError>(())
//! ```
//!
//! # Features
//!
//! - `std`: implement `std::error::Error` for error types
//! - `defmt`: register-level logging and `defmt::Format` derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Pedantic lints suppressed for this driver crate:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod error;
pub mod mock;
pub mod pcm5122;

pub use config::DacConfig;
pub use error::DacError;
pub use pcm5122::clock_tree::{apply_clock_plan, ClockPlan, ClockTreeStep, DivideRatio};
pub use pcm5122::register_map::{Page, Register, RegisterDump, RegisterMap};
pub use pcm5122::Pcm5122;
