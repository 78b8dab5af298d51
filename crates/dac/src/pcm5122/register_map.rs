//! Page-aware register catalogue
//!
//! A [`RegisterDescriptor`] describes one address and what it means on each
//! page. A [`Register`] is a descriptor resolved to a single page; the access
//! layer only accepts `Register`s, so writing a page-1 meaning while page 0 is
//! selected cannot be expressed.

use super::access::ShadowTable;
use super::registers;
use crate::error::DacError;

/// Register page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Page 0: control, clocking, interface, volume
    Zero,
    /// Page 1: analog output stage
    One,
}

impl Page {
    /// Value written to the page-select register.
    pub const fn number(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Page for a page-select value, if it is one of the modelled pages.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            _ => None,
        }
    }
}

/// One meaning of an address: its name and reset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Register name, unique across the map
    pub name: &'static str,
    /// Power-on value
    pub reset: u8,
}

/// What an address means on each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMeaning {
    /// Defined on page 0 only
    Page0Only(Field),
    /// Defined on page 1 only
    Page1Only(Field),
    /// Two unrelated registers sharing one address
    PageBoth(Field, Field),
}

impl PageMeaning {
    /// Page-0-only meaning.
    pub const fn page0(name: &'static str, reset: u8) -> Self {
        Self::Page0Only(Field { name, reset })
    }

    /// Page-1-only meaning.
    pub const fn page1(name: &'static str, reset: u8) -> Self {
        Self::Page1Only(Field { name, reset })
    }

    /// Distinct meanings on page 0 and page 1, given as `(name, reset)`.
    pub const fn both(page0: (&'static str, u8), page1: (&'static str, u8)) -> Self {
        Self::PageBoth(
            Field {
                name: page0.0,
                reset: page0.1,
            },
            Field {
                name: page1.0,
                reset: page1.1,
            },
        )
    }
}

/// One address of the register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDescriptor {
    address: u8,
    meaning: PageMeaning,
}

impl RegisterDescriptor {
    pub(crate) const fn new(address: u8, meaning: PageMeaning) -> Self {
        Self { address, meaning }
    }

    /// Register address within a page.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Per-page meaning.
    pub const fn meaning(&self) -> &PageMeaning {
        &self.meaning
    }

    /// The meaning of this address on `page`, if it has one.
    pub const fn field(&self, page: Page) -> Option<&Field> {
        match (&self.meaning, page) {
            (PageMeaning::Page0Only(f) | PageMeaning::PageBoth(f, _), Page::Zero)
            | (PageMeaning::Page1Only(f) | PageMeaning::PageBoth(_, f), Page::One) => Some(f),
            _ => None,
        }
    }

    /// `true` when the address means different things on page 0 and page 1.
    pub const fn is_dual_page(&self) -> bool {
        matches!(self.meaning, PageMeaning::PageBoth(..))
    }

    /// This address resolved to `page`.
    pub fn register(&self, page: Page) -> Option<Register> {
        self.field(page).map(|f| Register::new(f.name, page, self.address, f.reset))
    }

    /// Every page-bound register at this address, page 0 first.
    pub fn registers(&self) -> impl Iterator<Item = Register> {
        [self.register(Page::Zero), self.register(Page::One)]
            .into_iter()
            .flatten()
    }
}

/// A register resolved to one page: the unit the access layer writes.
///
/// Only the catalogue hands these out ([`RegisterMap::lookup`], the
/// constants in [`registers`](super::registers)), so every `Register` names a
/// documented `(page, address)` pair. Building one by hand does not compile:
///
/// ```compile_fail
/// use dac::{Page, Register};
/// let bogus = Register::new("BOGUS", Page::One, 0x3D, 0x00);
/// ```
///
/// ```compile_fail
/// use dac::{Page, Register};
/// let bogus = Register { name: "BOGUS", page: Page::One, address: 0x3D, reset: 0 };
/// ```
///
/// ```compile_fail
/// use dac::pcm5122::register_map::{PageMeaning, RegisterDescriptor};
/// use dac::Page;
/// let d = RegisterDescriptor::new(0x3D, PageMeaning::page1("BOGUS", 0x00));
/// let bogus = d.register(Page::One);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    name: &'static str,
    page: Page,
    address: u8,
    reset: u8,
}

impl Register {
    pub(crate) const fn new(name: &'static str, page: Page, address: u8, reset: u8) -> Self {
        Self {
            name,
            page,
            address,
            reset,
        }
    }

    /// Register name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Page the address must be selected on
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Address within the page
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Power-on value
    pub const fn reset(&self) -> u8 {
        self.reset
    }
}

/// Static register catalogue with name lookup.
#[derive(Debug, Clone, Copy)]
pub struct RegisterMap {
    descriptors: &'static [RegisterDescriptor],
}

impl RegisterMap {
    /// The PCM5122 register map.
    pub const PCM5122: Self = Self {
        descriptors: &registers::CATALOGUE,
    };

    /// Resolve a register by name.
    ///
    /// # Errors
    ///
    /// [`DacError::UnknownRegister`] if no page of any address has that name.
    pub fn lookup(&self, name: &str) -> Result<Register, DacError> {
        self.registers()
            .find(|r| r.name() == name)
            .ok_or(DacError::UnknownRegister)
    }

    /// Descriptor for `address`, if the address is documented.
    pub fn descriptor(&self, address: u8) -> Option<&'static RegisterDescriptor> {
        self.descriptors.iter().find(|d| d.address == address)
    }

    /// All descriptors in catalogue order.
    pub fn descriptors(&self) -> &'static [RegisterDescriptor] {
        self.descriptors
    }

    /// Every page-bound register in catalogue order.
    pub fn registers(&self) -> impl Iterator<Item = Register> + 'static {
        self.descriptors.iter().flat_map(RegisterDescriptor::registers)
    }

    /// Every register name in catalogue order (diagnostics only).
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> + 'static {
        self.registers().map(|r| r.name())
    }

    /// Number of documented addresses.
    pub fn occupied_addresses(&self) -> usize {
        self.descriptors.len()
    }

    /// Diagnostic dump of reset values.
    pub fn dump(&self) -> RegisterDump<'static> {
        RegisterDump {
            map: *self,
            shadow: None,
        }
    }
}

/// One line of a diagnostic dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    /// The register
    pub register: Register,
    /// Last value written through the access layer, if any
    pub shadow: Option<u8>,
}

/// Diagnostic view of the register map with advisory shadow values.
///
/// Not part of the control contract: shadows record intent, the chip holds
/// the truth.
#[derive(Clone, Copy)]
pub struct RegisterDump<'a> {
    map: RegisterMap,
    shadow: Option<&'a ShadowTable>,
}

impl<'a> RegisterDump<'a> {
    pub(crate) fn with_shadow(map: RegisterMap, shadow: &'a ShadowTable) -> Self {
        Self {
            map,
            shadow: Some(shadow),
        }
    }

    /// Snapshot of every register in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = RegisterSnapshot> + 'a {
        let shadow = self.shadow;
        self.map.registers().map(move |register| RegisterSnapshot {
            register,
            shadow: shadow.and_then(|s| s.get(register.page(), register.address())),
        })
    }

    /// Number of documented addresses.
    pub fn occupied_addresses(&self) -> usize {
        self.map.occupied_addresses()
    }
}

impl core::fmt::Display for RegisterDump<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for snap in self.iter() {
            let r = snap.register;
            write!(
                f,
                "{:<20} p{} 0x{:02X} reset=0x{:02X}",
                r.name(),
                r.page().number(),
                r.address(),
                r.reset()
            )?;
            match snap.shadow {
                Some(v) => writeln!(f, " shadow=0x{v:02X}")?,
                None => writeln!(f, " shadow=--")?,
            }
        }
        write!(f, "{} addresses occupied", self.occupied_addresses())
    }
}
