//! Recording register bus for host-side testing
//!
//! Implements [`RegisterBus`] without any hardware dependency. Every accepted
//! write is logged in order; a single write can be made to fail to exercise
//! error paths.

use heapless::Vec;
use platform::RegisterBus;

/// Capacity of the write log.
pub const LOG_CAPACITY: usize = 64;

/// Error produced by [`MockBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockBusError {
    /// Failure injected with [`MockBus::fail_on`]
    Injected,
    /// Write log is full
    LogFull,
}

/// Mock register bus: records `(address, value)` pairs for assertions.
#[derive(Debug, Default)]
pub struct MockBus {
    writes: Vec<(u8, u8), LOG_CAPACITY>,
    attempts: usize,
    fail_on: Option<usize>,
}

impl MockBus {
    /// Empty log, no failure armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `attempt`-th write (1-based, counted since creation or the
    /// last [`clear`](Self::clear)). The failed write is not logged.
    pub fn fail_on(&mut self, attempt: usize) {
        self.fail_on = Some(attempt);
    }

    /// Forget logged writes, the attempt counter and any armed failure.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.attempts = 0;
        self.fail_on = None;
    }

    /// Accepted writes, in bus order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    /// Number of writes attempted, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl RegisterBus for MockBus {
    type Error = MockBusError;

    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.fail_on == Some(self.attempts) {
            return Err(MockBusError::Injected);
        }
        self.writes.push((address, value)).map_err(|_| MockBusError::LogFull)
    }
}
