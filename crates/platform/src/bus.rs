//! Register bus abstraction
//!
//! The DAC control interface is write-only from the driver's point of view:
//! every operation is one `[register, value]` transaction. [`RegisterBus`] is
//! the seam the driver is generic over; [`I2cRegisterBus`] adapts any blocking
//! `embedded_hal::i2c::I2c` implementation to it.

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Single-register write transport.
///
/// Implementations own the physical bus handle and are bound to one device.
/// Each call is one complete, synchronous bus transaction; the caller never
/// issues a second write before the first returns.
pub trait RegisterBus {
    /// Transport error
    type Error: core::fmt::Debug;

    /// Write `value` to the device register at `address`.
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        T::write_register(self, address, value)
    }
}

/// [`RegisterBus`] over a blocking I²C peripheral.
///
/// Sends `[address, value]` in a single write transaction to a fixed 7-bit
/// device address.
pub struct I2cRegisterBus<I> {
    i2c: I,
    device: SevenBitAddress,
}

impl<I: I2c> I2cRegisterBus<I> {
    /// Bind `i2c` to the device at 7-bit address `device`.
    pub fn new(i2c: I, device: SevenBitAddress) -> Self {
        Self { i2c, device }
    }

    /// 7-bit device address this bus writes to.
    pub fn device_address(&self) -> SevenBitAddress {
        self.device
    }

    /// Give the I²C peripheral back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.device, &[address, value])
    }
}
