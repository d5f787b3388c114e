//! I2C bus abstractions
//!
//! The display only ever writes to the bus, so the capability is a single
//! blocking, addressed write. [`HalI2c`] adapts any `embedded-hal` 1.0
//! blocking I2C master to it.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// I2C bus master
///
/// Each call is one complete bus transaction: start, address, `data`, stop.
/// The call returns once the device has acknowledged every byte, or with
/// an error as soon as the transaction fails.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };

    /// Overclocked SH1106 link (1.5 MHz)
    ///
    /// Beyond fast mode plus, but tolerated by SH1106 modules on
    /// short wiring; a full frame then takes roughly 7 ms.
    pub const OLED: Self = Self {
        frequency: 1_500_000,
    };
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (address or data)
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// [`I2cBus`] over a blocking `embedded-hal` I2C master
///
/// Errors are reduced to [`I2cBusError`] so the driver's error type does not
/// depend on the chip HAL.
pub struct HalI2c<T> {
    i2c: T,
}

impl<T: I2c> HalI2c<T> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Give back the wrapped master
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T: I2c> I2cBus for HalI2c<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.i2c, address, data).map_err(|e| I2cBusError::from(e.kind()))
    }
}
