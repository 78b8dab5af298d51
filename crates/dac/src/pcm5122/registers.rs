//! PCM5122 register map
//!
//! Source: Texas Instruments PCM512x datasheet (SLASE12) §9.6, register
//! names follow the Linux `pcm512x` codec driver.
//!
//! # Page-banked address space
//!
//! Register `0x00` selects the active page. Addresses `0x01..=0x09` mean
//! different things on page 0 (control) and page 1 (analog output stage);
//! those rows are [`PageMeaning::PageBoth`]. `0x05` exists only on page 1.
//!
//! # Clock dividers
//!
//! Every divider and the PLL P / R coefficients are programmed as
//! `ratio − 1` (register value 0 divides by 1). The encoding lives in
//! [`DivideRatio::register_value`](super::clock_tree::DivideRatio::register_value)
//! and nowhere else; constants here are addresses and bit fields only.
//!
//! # Digital volume
//!
//! `DIGITAL_VOLUME_2` (left) and `DIGITAL_VOLUME_3` (right) take 0.5 dB steps
//! from `0x00` (+24 dB) to `0xFE` (−103 dB). `0xFF` mutes the channel.

use super::register_map::{Page, PageMeaning, Register, RegisterDescriptor};

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// PLL_EN: bit 0 enables the PLL (PLL becomes the master clock source).
pub const PLL_ENABLE: u8 = 0x01;

/// PLL_REF bits \[6:4\]: PLL reference = SCK.
pub const SREF_SCK: u8 = 0b000 << 4;
/// PLL_REF bits \[6:4\]: PLL reference = BCK.
pub const SREF_BCK: u8 = 0b001 << 4;
/// PLL_REF bits \[6:4\]: PLL reference = GPIO (selected by GPIO_PLLIN).
pub const SREF_GPIO: u8 = 0b011 << 4;

/// DAC_REF bits \[6:4\]: DAC clock source = master clock.
pub const SDAC_MASTER: u8 = 0b000 << 4;
/// DAC_REF bits \[6:4\]: DAC clock source = PLL output.
pub const SDAC_PLL: u8 = 0b001 << 4;
/// DAC_REF bits \[6:4\]: DAC clock source = SCK.
pub const SDAC_SCK: u8 = 0b011 << 4;
/// DAC_REF bits \[6:4\]: DAC clock source = BCK.
pub const SDAC_BCK: u8 = 0b100 << 4;
/// DAC_REF bits \[6:4\]: DAC clock source = GPIO (selected by GPIO_DACIN).
pub const SDAC_GPIO: u8 = 0b101 << 4;

/// PLL_COEFF_2: D fraction high byte holds bits \[13:8\].
pub const PLL_D_HIGH_MASK: u8 = 0x3F;

/// Address of the page-select register (present on every page).
pub const PAGE_SELECT_ADDR: u8 = 0x00;

// ---------------------------------------------------------------------------
// Page-bound registers used by the driver
// ---------------------------------------------------------------------------

/// Page select. Writes through the access layer update its tracked page.
pub const PAGE_SELECT: Register = Register::new("PAGE_SELECT", Page::Zero, 0x00, 0x00);

/// PLL enable.
pub const PLL_EN: Register = Register::new("PLL_EN", Page::Zero, 0x04, 0x00);

/// PLL reference clock select.
pub const PLL_REF: Register = Register::new("PLL_REF", Page::Zero, 0x0D, 0x00);

/// DAC clock source select.
pub const DAC_REF: Register = Register::new("DAC_REF", Page::Zero, 0x0E, 0x00);

/// PLL P (pre-divider), encoded P − 1 in bits \[3:0\].
pub const PLL_COEFF_0: Register = Register::new("PLL_COEFF_0", Page::Zero, 0x14, 0x00);

/// PLL J (integer multiplier), bits \[5:0\].
pub const PLL_COEFF_1: Register = Register::new("PLL_COEFF_1", Page::Zero, 0x15, 0x00);

/// PLL D (fraction × 10 000) bits \[13:8\].
pub const PLL_COEFF_2: Register = Register::new("PLL_COEFF_2", Page::Zero, 0x16, 0x00);

/// PLL D (fraction × 10 000) bits \[7:0\].
pub const PLL_COEFF_3: Register = Register::new("PLL_COEFF_3", Page::Zero, 0x17, 0x00);

/// PLL R (post-multiplier), encoded R − 1 in bits \[3:0\].
pub const PLL_COEFF_4: Register = Register::new("PLL_COEFF_4", Page::Zero, 0x18, 0x00);

/// DSP clock divider (from PLL output), encoded N − 1.
pub const DSP_CLKDIV: Register = Register::new("DSP_CLKDIV", Page::Zero, 0x1B, 0x00);

/// DAC clock divider (from DAC clock source), encoded N − 1.
pub const DAC_CLKDIV: Register = Register::new("DAC_CLKDIV", Page::Zero, 0x1C, 0x00);

/// Negative charge pump clock divider (from DAC clock), encoded N − 1.
pub const NCP_CLKDIV: Register = Register::new("NCP_CLKDIV", Page::Zero, 0x1D, 0x00);

/// Oversampling clock divider (from DAC clock), encoded N − 1.
pub const OSR_CLKDIV: Register = Register::new("OSR_CLKDIV", Page::Zero, 0x1E, 0x00);

/// Serial audio interface format and word length.
pub const I2S_1: Register = Register::new("I2S_1", Page::Zero, 0x28, 0x00);

/// Left channel digital volume.
pub const DIGITAL_VOLUME_2: Register = Register::new("DIGITAL_VOLUME_2", Page::Zero, 0x3D, 0x30);

/// Right channel digital volume.
pub const DIGITAL_VOLUME_3: Register = Register::new("DIGITAL_VOLUME_3", Page::Zero, 0x3E, 0x30);

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

const fn p0(address: u8, name: &'static str, reset: u8) -> RegisterDescriptor {
    RegisterDescriptor::new(address, PageMeaning::page0(name, reset))
}

const fn p1(address: u8, name: &'static str, reset: u8) -> RegisterDescriptor {
    RegisterDescriptor::new(address, PageMeaning::page1(name, reset))
}

/// `address` carrying `page0` on page 0 and an unrelated `page1` on page 1.
const fn dual(
    address: u8,
    page0: (&'static str, u8),
    page1: (&'static str, u8),
) -> RegisterDescriptor {
    RegisterDescriptor::new(address, PageMeaning::both(page0, page1))
}

/// Every documented control register, in address order.
///
/// Reset values are the power-on values the bring-up tooling assumes; they
/// are advisory and never read back from the chip.
pub const CATALOGUE: [RegisterDescriptor; 69] = [
    p0(0x00, "PAGE_SELECT", 0x00),
    dual(0x01, ("RESET", 0x00), ("OUTPUT_AMPLITUDE", 0x00)),
    dual(0x02, ("POWER", 0x00), ("ANALOG_GAIN_CTRL", 0x00)),
    p0(0x03, "MUTE", 0x00),
    p0(0x04, "PLL_EN", 0x00),
    p1(0x05, "UNDERVOLTAGE_PROT", 0x00),
    dual(0x06, ("SPI_MISO_FUNCTION", 0x00), ("ANALOG_MUTE_CTRL", 0x00)),
    dual(0x07, ("DSP", 0x00), ("ANALOG_GAIN_BOOST", 0x00)),
    dual(0x08, ("GPIO_EN", 0x00), ("VCOM_CTRL_1", 0x00)),
    dual(0x09, ("BCLK_LRCLK_CFG", 0x00), ("VCOM_CTRL_2", 0x01)),
    p0(0x0A, "DSP_GPIO_INPUT", 0x00),
    p0(0x0C, "MASTER_MODE", 0x7C),
    p0(0x0D, "PLL_REF", 0x00),
    p0(0x0E, "DAC_REF", 0x00),
    p0(0x12, "GPIO_PLLIN", 0x00),
    p0(0x13, "SYNCHRONIZE", 0x10),
    p0(0x14, "PLL_COEFF_0", 0x00),
    p0(0x15, "PLL_COEFF_1", 0x00),
    p0(0x16, "PLL_COEFF_2", 0x00),
    p0(0x17, "PLL_COEFF_3", 0x00),
    p0(0x18, "PLL_COEFF_4", 0x00),
    p0(0x1B, "DSP_CLKDIV", 0x00),
    p0(0x1C, "DAC_CLKDIV", 0x00),
    p0(0x1D, "NCP_CLKDIV", 0x00),
    p0(0x1E, "OSR_CLKDIV", 0x00),
    p0(0x20, "MASTER_CLKDIV_1", 0x00),
    p0(0x21, "MASTER_CLKDIV_2", 0x00),
    p0(0x22, "FS_SPEED_MODE", 0x00),
    p0(0x23, "IDAC_1", 0x01),
    p0(0x24, "IDAC_2", 0x00),
    p0(0x25, "ERROR_DETECT", 0x00),
    p0(0x28, "I2S_1", 0x00),
    p0(0x29, "I2S_2", 0x00),
    p0(0x2A, "DAC_ROUTING", 0x11),
    p0(0x2B, "DSP_PROGRAM", 0x01),
    p0(0x2C, "CLKDET", 0x00),
    p0(0x3B, "AUTO_MUTE", 0x00),
    p0(0x3C, "DIGITAL_VOLUME_1", 0x00),
    p0(0x3D, "DIGITAL_VOLUME_2", 0x30),
    p0(0x3E, "DIGITAL_VOLUME_3", 0x30),
    p0(0x3F, "DIGITAL_MUTE_1", 0x22),
    p0(0x40, "DIGITAL_MUTE_2", 0x00),
    p0(0x41, "DIGITAL_MUTE_3", 0x07),
    p0(0x50, "GPIO_OUTPUT_1", 0x00),
    p0(0x51, "GPIO_OUTPUT_2", 0x00),
    p0(0x52, "GPIO_OUTPUT_3", 0x00),
    p0(0x53, "GPIO_OUTPUT_4", 0x00),
    p0(0x54, "GPIO_OUTPUT_5", 0x00),
    p0(0x55, "GPIO_OUTPUT_6", 0x00),
    p0(0x56, "GPIO_CONTROL_1", 0x00),
    p0(0x57, "GPIO_CONTROL_2", 0x00),
    p0(0x5A, "OVERFLOW", 0x00),
    p0(0x5B, "RATE_DET_1", 0x00),
    p0(0x5C, "RATE_DET_2", 0x00),
    p0(0x5D, "RATE_DET_3", 0x00),
    p0(0x5E, "RATE_DET_4", 0x00),
    p0(0x5F, "CLOCK_STATUS", 0x00),
    p0(0x6C, "ANALOG_MUTE_DET", 0x00),
    p0(0x6D, "MONITOR_6D", 0x00),
    p0(0x72, "MONITOR_72", 0x00),
    p0(0x73, "MONITOR_73", 0x00),
    p0(0x76, "MONITOR_76", 0x00),
    p0(0x77, "GPIN", 0x00),
    p0(0x78, "DIGITAL_MUTE_DET", 0x00),
    p0(0x79, "MONITOR_79", 0x00),
    p0(0x7A, "MONITOR_7A", 0x00),
    p0(0x7B, "MONITOR_7B", 0x00),
    p0(0x7C, "MONITOR_7C", 0x00),
    p0(0x7D, "MONITOR_7D", 0x00),
];
