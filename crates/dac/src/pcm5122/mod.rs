//! TI PCM5122 stereo DAC
//!
//! - [`registers`]: named registers and the full register catalogue
//! - [`register_map`]: page-aware descriptors and name lookup
//! - [`access`]: page tracking and ordered register writes
//! - [`clock_tree`]: PLL and divider programming
//! - [`driver`]: initialization and channel control

pub mod access;
pub mod clock_tree;
pub mod driver;
pub mod register_map;
pub mod registers;

pub use driver::Pcm5122;
