//! Register access layer
//!
//! Turns page-bound [`Register`] writes into bus transactions. The layer
//! tracks the selected page and emits a page select before any write whose
//! page differs from it. Writes are never batched, reordered or coalesced.

use platform::RegisterBus;

use super::register_map::{Page, Register, RegisterDump, RegisterMap};
use super::registers::PAGE_SELECT_ADDR;
use crate::error::DacError;

/// Addresses per page (7-bit register address).
const PAGE_SIZE: usize = 128;

/// Last value written to each `(page, address)`.
///
/// Advisory only: used for diagnostics, never consulted to skip a write.
#[derive(Debug, Clone)]
pub struct ShadowTable {
    pages: [[Option<u8>; PAGE_SIZE]; 2],
}

impl ShadowTable {
    const fn new() -> Self {
        Self {
            pages: [[None; PAGE_SIZE]; 2],
        }
    }

    /// Last value written to `address` on `page`.
    pub fn get(&self, page: Page, address: u8) -> Option<u8> {
        self.pages
            .get(usize::from(page.number()))
            .and_then(|p| p.get(usize::from(address)))
            .copied()
            .flatten()
    }

    fn record(&mut self, page: Page, address: u8, value: u8) {
        if let Some(slot) = self
            .pages
            .get_mut(usize::from(page.number()))
            .and_then(|p| p.get_mut(usize::from(address)))
        {
            *slot = Some(value);
        }
    }
}

/// Ordered, page-aware register writer over an owned bus.
pub struct RegisterAccess<B> {
    bus: B,
    page: Option<Page>,
    shadow: ShadowTable,
}

impl<B: RegisterBus> RegisterAccess<B> {
    /// Wrap `bus`. The selected page starts unknown, so the first write
    /// always selects its page.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            page: None,
            shadow: ShadowTable::new(),
        }
    }

    /// Select `page`, unconditionally.
    ///
    /// If the write fails the selected page becomes unknown.
    pub fn select_page(&mut self, page: Page) -> Result<(), DacError> {
        self.page = None;
        self.bus_write(PAGE_SELECT_ADDR, page.number())?;
        self.shadow.record(Page::Zero, PAGE_SELECT_ADDR, page.number());
        self.page = Some(page);
        Ok(())
    }

    /// Write `value` to `register`, selecting its page first if needed.
    ///
    /// One bus transaction for the register itself, preceded by one page
    /// select when the tracked page is unknown or different.
    pub fn write(&mut self, register: Register, value: u8) -> Result<(), DacError> {
        if register.address() == PAGE_SELECT_ADDR {
            self.page = None;
            self.bus_write(PAGE_SELECT_ADDR, value)?;
            self.shadow.record(Page::Zero, PAGE_SELECT_ADDR, value);
            self.page = Page::from_number(value);
            return Ok(());
        }

        if self.page != Some(register.page()) {
            self.select_page(register.page())?;
        }
        self.bus_write(register.address(), value)?;
        self.shadow.record(register.page(), register.address(), value);
        Ok(())
    }

    /// Page the chip is known to have selected, if any.
    pub fn current_page(&self) -> Option<Page> {
        self.page
    }

    /// Last value written to `register` through this layer.
    pub fn shadow(&self, register: Register) -> Option<u8> {
        self.shadow.get(register.page(), register.address())
    }

    /// Diagnostic dump of the PCM5122 map with shadow values.
    pub fn dump(&self) -> RegisterDump<'_> {
        RegisterDump::with_shadow(RegisterMap::PCM5122, &self.shadow)
    }

    /// Borrow the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the bus.
    ///
    /// Writing through the bus directly bypasses page tracking.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.bus
    }

    fn bus_write(&mut self, address: u8, value: u8) -> Result<(), DacError> {
        #[cfg(feature = "defmt")]
        defmt::trace!("reg {=u8:#x} <- {=u8:#x}", address, value);

        self.bus.write_register(address, value).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("bus write to {=u8:#x} failed", address);
            DacError::BusWriteFailed { address }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockBus;
    use crate::pcm5122::registers;

    #[test]
    fn first_write_selects_page() {
        let mut access = RegisterAccess::new(MockBus::new());
        access.write(registers::I2S_1, 0x03).unwrap();
        assert_eq!(access.bus().writes(), &[(0x00, 0x00), (0x28, 0x03)]);
        assert_eq!(access.current_page(), Some(Page::Zero));
    }

    #[test]
    fn same_page_writes_do_not_reselect() {
        let mut access = RegisterAccess::new(MockBus::new());
        access.select_page(Page::Zero).unwrap();
        access.write(registers::DIGITAL_VOLUME_2, 0x40).unwrap();
        access.write(registers::DIGITAL_VOLUME_3, 0x40).unwrap();
        assert_eq!(
            access.bus().writes(),
            &[(0x00, 0x00), (0x3D, 0x40), (0x3E, 0x40)]
        );
    }

    #[test]
    fn page_change_emits_select_before_write() {
        let mut access = RegisterAccess::new(MockBus::new());
        let vcom = RegisterMap::PCM5122.lookup("VCOM_CTRL_2").unwrap();
        access.write(registers::PLL_EN, 0x01).unwrap();
        access.write(vcom, 0x00).unwrap();
        access.write(registers::PLL_EN, 0x00).unwrap();
        assert_eq!(
            access.bus().writes(),
            &[
                (0x00, 0x00),
                (0x04, 0x01),
                (0x00, 0x01),
                (0x09, 0x00),
                (0x00, 0x00),
                (0x04, 0x00),
            ]
        );
    }

    #[test]
    fn identical_consecutive_writes_are_not_coalesced() {
        let mut access = RegisterAccess::new(MockBus::new());
        access.select_page(Page::Zero).unwrap();
        access.write(registers::PLL_EN, 0x01).unwrap();
        access.write(registers::PLL_EN, 0x01).unwrap();
        assert_eq!(access.bus().writes().len(), 3);
    }

    #[test]
    fn failed_page_select_leaves_page_unknown() {
        let mut bus = MockBus::new();
        bus.fail_on(1);
        let mut access = RegisterAccess::new(bus);
        assert_eq!(
            access.write(registers::I2S_1, 0x03),
            Err(DacError::BusWriteFailed { address: 0x00 })
        );
        assert_eq!(access.current_page(), None);
        // The register write itself was never attempted.
        assert_eq!(access.bus().attempts(), 1);
    }

    #[test]
    fn failed_write_reports_address_and_keeps_old_shadow() {
        let mut bus = MockBus::new();
        bus.fail_on(3);
        let mut access = RegisterAccess::new(bus);
        access.write(registers::DIGITAL_VOLUME_2, 0x40).unwrap();
        assert_eq!(
            access.write(registers::DIGITAL_VOLUME_2, 0x50),
            Err(DacError::BusWriteFailed { address: 0x3D })
        );
        assert_eq!(access.shadow(registers::DIGITAL_VOLUME_2), Some(0x40));
    }

    #[test]
    fn raw_page_select_write_updates_tracked_page() {
        let mut access = RegisterAccess::new(MockBus::new());
        access.write(registers::PAGE_SELECT, 0x01).unwrap();
        assert_eq!(access.current_page(), Some(Page::One));
        access.write(registers::PAGE_SELECT, 0x2C).unwrap();
        assert_eq!(access.current_page(), None);
    }

    #[test]
    fn shadows_are_kept_per_page() {
        let mut access = RegisterAccess::new(MockBus::new());
        let power = RegisterMap::PCM5122.lookup("POWER").unwrap();
        let gain = RegisterMap::PCM5122.lookup("ANALOG_GAIN_CTRL").unwrap();
        access.write(power, 0x10).unwrap();
        access.write(gain, 0x22).unwrap();
        assert_eq!(access.shadow(power), Some(0x10));
        assert_eq!(access.shadow(gain), Some(0x22));
    }

    #[test]
    fn dump_shows_written_shadow() {
        let mut access = RegisterAccess::new(MockBus::new());
        access.write(registers::DAC_CLKDIV, 0x0F).unwrap();
        let snap = access
            .dump()
            .iter()
            .find(|s| s.register == registers::DAC_CLKDIV)
            .unwrap();
        assert_eq!(snap.shadow, Some(0x0F));
    }
}
