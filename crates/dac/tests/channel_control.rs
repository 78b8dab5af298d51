//! Bring-up and channel control over a mocked I²C bus:
//! run with `cargo test -p dac --test channel_control`
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use dac::mock::MockBus;
use dac::pcm5122::clock_tree::{ClockPlanError, PllCoefficients};
use dac::{ClockPlan, DacConfig, DacError, DivideRatio, Pcm5122};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use platform::{Channel, DacControl, MuteState};

const ADDR: u8 = 0x4D;

/// Every `[register, value]` pair of a successful bring-up.
const BRING_UP: [(u8, u8); 14] = [
    (0x00, 0x00),
    (0x28, 0x03),
    (0x0D, 0x10),
    (0x15, 0x10),
    (0x16, 0x00),
    (0x17, 0x00),
    (0x18, 0x01),
    (0x14, 0x00),
    (0x04, 0x01),
    (0x1B, 0x01),
    (0x0E, 0x10),
    (0x1C, 0x0F),
    (0x1D, 0x03),
    (0x1E, 0x07),
];

fn write(reg: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![reg, value])
}

#[test]
fn bring_up_and_channel_control_over_i2c() {
    let mut expectations: Vec<_> = BRING_UP.iter().map(|&(r, v)| write(r, v)).collect();
    expectations.extend([
        write(0x3D, 0x40),
        write(0x3E, 0xFF),
        write(0x3E, 0x30),
    ]);

    let mut dac = Pcm5122::new_i2c(I2cMock::new(&expectations), DacConfig::default());
    dac.initialize().unwrap();
    dac.set_volume(Channel::Left, 0x40).unwrap();
    dac.set_mute(Channel::Right, MuteState::Muted).unwrap();
    dac.set_mute(Channel::Right, MuteState::Unmuted).unwrap();

    dac.release().release().done();
}

#[test]
fn i2c_failure_reports_register_address() {
    let expectations = [
        write(0x00, 0x00),
        write(0x28, 0x03).with_error(ErrorKind::Other),
    ];
    let mut dac = Pcm5122::new_i2c(I2cMock::new(&expectations), DacConfig::default());

    assert_eq!(dac.initialize(), Err(DacError::BusWriteFailed { address: 0x28 }));
    assert!(!dac.is_initialized());

    dac.release().release().done();
}

#[test]
fn non_default_address_is_used() {
    let config = DacConfig {
        i2c_address: 0x4C,
        ..DacConfig::default()
    };
    let expectations: Vec<_> = BRING_UP
        .iter()
        .map(|&(r, v)| I2cTransaction::write(0x4C, vec![r, v]))
        .collect();
    let mut dac = Pcm5122::new_i2c(I2cMock::new(&expectations), config);
    dac.initialize().unwrap();
    dac.release().release().done();
}

#[test]
fn initialize_twice_repeats_identical_sequence() {
    let mut dac = Pcm5122::new(MockBus::new());
    dac.initialize().unwrap();
    dac.initialize().unwrap();

    let bus = dac.release();
    let (first, second) = bus.writes().split_at(14);
    assert_eq!(first, &BRING_UP);
    assert_eq!(second, &BRING_UP);
}

#[test]
fn channel_control_refused_until_initialized() {
    let mut dac = Pcm5122::new(MockBus::new());
    for channel in Channel::ALL {
        assert_eq!(dac.set_volume(channel, 0x30), Err(DacError::NotInitialized));
        assert_eq!(
            dac.set_mute(channel, MuteState::Unmuted),
            Err(DacError::NotInitialized)
        );
    }
    assert_eq!(dac.release().attempts(), 0);
}

#[test]
fn failed_reinitialize_revokes_channel_control() {
    let mut dac = Pcm5122::new(MockBus::new());
    dac.initialize().unwrap();
    dac.set_volume(Channel::Left, 0x30).unwrap();

    let mut bus = dac.release();
    bus.clear();
    bus.fail_on(10);
    let mut dac = Pcm5122::new(bus);
    assert!(matches!(
        dac.initialize(),
        Err(DacError::ClockTreePartiallyConfigured { .. })
    ));
    assert_eq!(
        dac.set_mute(Channel::Left, MuteState::Muted),
        Err(DacError::NotInitialized)
    );
}

#[test]
fn mute_addresses_never_overlap() {
    let mut dac = Pcm5122::new(MockBus::new());
    dac.initialize().unwrap();
    dac.set_mute(Channel::Left, MuteState::Muted).unwrap();
    dac.set_mute(Channel::Right, MuteState::Muted).unwrap();

    let bus = dac.release();
    let tail = &bus.writes()[14..];
    assert_eq!(tail.len(), 2);
    assert_ne!(tail[0].0, tail[1].0);
    assert!(tail.iter().all(|&(_, v)| v == 0xFF));
}

#[test]
fn volume_extremes() {
    let mut dac = Pcm5122::new(MockBus::new());
    dac.initialize().unwrap();
    dac.set_volume(Channel::Left, 0x00).unwrap();
    dac.set_volume(Channel::Left, 0xFE).unwrap();
    assert_eq!(
        dac.set_volume(Channel::Left, 0xFF),
        Err(DacError::VolumeOutOfRange { level: 0xFF })
    );
    let bus = dac.release();
    assert_eq!(&bus.writes()[14..], &[(0x3D, 0x00), (0x3D, 0xFE)]);
    assert_eq!(bus.attempts(), 16);
}

#[test]
fn generic_control_through_trait() {
    fn silence<D: DacControl>(dac: &mut D) -> Result<(), D::Error> {
        for channel in Channel::ALL {
            dac.set_mute(channel, MuteState::Muted)?;
        }
        Ok(())
    }

    let mut dac = Pcm5122::new(MockBus::new());
    assert_eq!(silence(&mut dac), Err(DacError::NotInitialized));
    dac.initialize().unwrap();
    silence(&mut dac).unwrap();
}

/// 96 kHz BCK would push the 44.1 kHz plan to 196.6 MHz: nothing may reach
/// the chip and channel control stays locked.
#[test]
fn out_of_lock_clock_plan_is_refused_before_any_write() {
    let config = DacConfig {
        sample_rate_hz: 96_000,
        ..DacConfig::default()
    };
    let mut dac = Pcm5122::with_config(MockBus::new(), config);

    assert_eq!(
        dac.initialize(),
        Err(DacError::InvalidClockPlan(
            ClockPlanError::PllOutputOutOfRange { hz: 196_608_000 }
        ))
    );
    assert_eq!(
        dac.set_volume(Channel::Left, 0x30),
        Err(DacError::NotInitialized)
    );
    assert_eq!(dac.release().attempts(), 0);
}

/// P = 100 and D = 20000 do not fit their register fields.
#[test]
fn out_of_field_coefficients_are_refused_before_any_write() {
    let plan = ClockPlan {
        pll: PllCoefficients {
            p: DivideRatio::new(100).unwrap(),
            d: 20_000,
            ..ClockPlan::BCK_2_8224_MHZ.pll
        },
        ..ClockPlan::BCK_2_8224_MHZ
    };
    let config = DacConfig {
        clock_plan: plan,
        ..DacConfig::default()
    };
    // No I²C transaction is expected at all.
    let mut dac = Pcm5122::new_i2c(I2cMock::new(&[] as &[I2cTransaction]), config);

    assert_eq!(
        dac.initialize(),
        Err(DacError::InvalidClockPlan(
            ClockPlanError::CoefficientOutOfRange { name: "P" }
        ))
    );
    assert!(!dac.is_initialized());

    dac.release().release().done();
}

/// Unmute restores the 0 dB code, not the previous level.
#[test]
fn unmute_returns_to_unity_and_volume_must_be_reapplied() {
    let mut dac = Pcm5122::new(MockBus::new());
    dac.initialize().unwrap();
    dac.set_volume(Channel::Left, 0x90).unwrap();
    dac.set_mute(Channel::Left, MuteState::Muted).unwrap();
    dac.set_mute(Channel::Left, MuteState::Unmuted).unwrap();
    dac.set_volume(Channel::Left, 0x90).unwrap();

    let bus = dac.release();
    assert_eq!(
        &bus.writes()[14..],
        &[(0x3D, 0x90), (0x3D, 0xFF), (0x3D, 0x30), (0x3D, 0x90)]
    );
}
