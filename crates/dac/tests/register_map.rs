//! Register map consistency tests: run with `cargo test -p dac --test register_map`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use dac::pcm5122::registers;
use dac::{Page, Register, RegisterMap};

const MAP: RegisterMap = RegisterMap::PCM5122;

#[test]
fn page_address_pairs_are_unique() {
    let mut seen = HashSet::new();
    for r in MAP.registers() {
        assert!(
            seen.insert((r.page().number(), r.address())),
            "duplicate (page {}, 0x{:02X})",
            r.page().number(),
            r.address()
        );
    }
}

#[test]
fn names_are_unique() {
    let mut seen = HashSet::new();
    for name in MAP.all_names() {
        assert!(seen.insert(name), "duplicate name {name}");
    }
}

#[test]
fn addresses_are_unique() {
    let mut seen = HashSet::new();
    for d in MAP.descriptors() {
        assert!(seen.insert(d.address()), "duplicate address 0x{:02X}", d.address());
    }
    assert_eq!(seen.len(), MAP.occupied_addresses());
}

#[test]
fn dual_page_descriptors_have_distinct_names() {
    let dual: Vec<_> = MAP.descriptors().iter().filter(|d| d.is_dual_page()).collect();
    assert!(!dual.is_empty());
    for d in dual {
        let p0 = d.field(Page::Zero).unwrap().name;
        let p1 = d.field(Page::One).unwrap().name;
        assert_ne!(p0, p1, "0x{:02X}", d.address());
    }
}

#[test]
fn named_constants_agree_with_lookup() {
    let constants: [Register; 16] = [
        registers::PAGE_SELECT,
        registers::PLL_EN,
        registers::PLL_REF,
        registers::DAC_REF,
        registers::PLL_COEFF_0,
        registers::PLL_COEFF_1,
        registers::PLL_COEFF_2,
        registers::PLL_COEFF_3,
        registers::PLL_COEFF_4,
        registers::DSP_CLKDIV,
        registers::DAC_CLKDIV,
        registers::NCP_CLKDIV,
        registers::OSR_CLKDIV,
        registers::I2S_1,
        registers::DIGITAL_VOLUME_2,
        registers::DIGITAL_VOLUME_3,
    ];
    for c in constants {
        assert_eq!(MAP.lookup(c.name()), Ok(c), "{}", c.name());
    }
}

#[test]
fn every_name_resolves_to_its_own_register() {
    for r in MAP.registers() {
        let found = MAP.lookup(r.name()).unwrap();
        assert_eq!(found, r);
        assert_eq!(
            MAP.descriptor(r.address()).and_then(|d| d.register(r.page())),
            Some(r)
        );
    }
}

#[test]
fn volume_registers_reset_to_unity() {
    assert_eq!(registers::DIGITAL_VOLUME_2.reset(), 0x30);
    assert_eq!(registers::DIGITAL_VOLUME_3.reset(), 0x30);
    assert_ne!(
        registers::DIGITAL_VOLUME_2.address(),
        registers::DIGITAL_VOLUME_3.address()
    );
}

#[test]
fn occupied_address_count() {
    assert_eq!(MAP.occupied_addresses(), 69);
}
