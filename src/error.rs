//! Error types for the countdown display driver.

use core::fmt;

use embedded_hal_async::i2c::ErrorKind;

/// Errors raised while turning a count into segment codes.
///
/// These indicate a logic defect: the countdown never leaves `0..=9999`
/// while digits are being encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodingError {
    /// Character outside `'0'..='9'`.
    InvalidDigit(char),
    /// Count does not fit into four decimal digits.
    ValueOutOfRange(i32),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodingError::InvalidDigit(c) => write!(f, "Invalid digit {:?} (must be '0'-'9')", c),
            EncodingError::ValueOutOfRange(v) => {
                write!(f, "Value {} out of range (must be 0-9999)", v)
            }
        }
    }
}

/// Errors that can occur while driving the display.
///
/// Bus errors are reduced to their [`ErrorKind`] so the type stays
/// independent of the concrete I2C implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The peripheral manager could not hand out the I2C device.
    BusUnavailable,
    /// A start-up command was rejected; the countdown was not started.
    ConfigurationWriteFailed(ErrorKind),
    /// A digit register write failed during a refresh tick.
    DisplayWriteFailed(ErrorKind),
    /// A power-down command failed. Only ever logged.
    ShutdownWriteFailed(ErrorKind),
    /// Handing the I2C device back failed. Only ever logged.
    CloseFailed,
    /// The count could not be encoded.
    Encoding(EncodingError),
}

impl From<EncodingError> for DisplayError {
    fn from(e: EncodingError) -> Self {
        DisplayError::Encoding(e)
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::BusUnavailable => write!(f, "I2C bus unavailable"),
            DisplayError::ConfigurationWriteFailed(k) => {
                write!(f, "Configuration write failed: {:?}", k)
            }
            DisplayError::DisplayWriteFailed(k) => write!(f, "Display write failed: {:?}", k),
            DisplayError::ShutdownWriteFailed(k) => write!(f, "Shutdown write failed: {:?}", k),
            DisplayError::CloseFailed => write!(f, "I2C device could not be closed"),
            DisplayError::Encoding(e) => write!(f, "Encoding error: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DisplayError::BusUnavailable => defmt::write!(f, "I2C bus unavailable"),
            DisplayError::ConfigurationWriteFailed(k) => {
                defmt::write!(f, "Configuration write failed: {}", defmt::Debug2Format(k))
            }
            DisplayError::DisplayWriteFailed(k) => {
                defmt::write!(f, "Display write failed: {}", defmt::Debug2Format(k))
            }
            DisplayError::ShutdownWriteFailed(k) => {
                defmt::write!(f, "Shutdown write failed: {}", defmt::Debug2Format(k))
            }
            DisplayError::CloseFailed => defmt::write!(f, "I2C device could not be closed"),
            DisplayError::Encoding(e) => defmt::write!(f, "Encoding error: {}", e),
        }
    }
}

/// Errors reported by [`SingleBusManager`](crate::SingleBusManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// No bus with the requested name is managed.
    UnknownBus,
    /// The bus is already held by another device handle.
    BusInUse,
    /// A device was returned while the bus was not handed out.
    BusNotOpen,
}

impl fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PeripheralError::UnknownBus => write!(f, "Unknown bus name"),
            PeripheralError::BusInUse => write!(f, "Bus already in use"),
            PeripheralError::BusNotOpen => write!(f, "Bus was not open"),
        }
    }
}
