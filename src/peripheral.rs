//! Bus acquisition seam between the host environment and the driver.
//!
//! The host owns the I2C peripherals. [`DisplayDriver`](crate::DisplayDriver)
//! borrows a device from a [`PeripheralManager`] on `open()` and hands it
//! back on `close()`.

use embedded_hal_async::i2c::I2c;

use crate::error::PeripheralError;

/// Source of I2C device handles, addressed by bus name.
pub trait PeripheralManager {
    /// Device handle type handed out to drivers.
    type Bus: I2c;
    /// Error reported when a bus cannot be opened or closed.
    type Error;

    /// Open the bus called `bus_name` for the device at `address`.
    fn open_i2c_device(&mut self, bus_name: &str, address: u8) -> Result<Self::Bus, Self::Error>;

    /// Take back a device previously returned by
    /// [`open_i2c_device`](Self::open_i2c_device).
    fn close_i2c_device(&mut self, bus: Self::Bus) -> Result<(), Self::Error>;
}

impl<M> PeripheralManager for &mut M
where
    M: PeripheralManager,
{
    type Bus = M::Bus;
    type Error = M::Error;

    fn open_i2c_device(&mut self, bus_name: &str, address: u8) -> Result<Self::Bus, Self::Error> {
        M::open_i2c_device(self, bus_name, address)
    }

    fn close_i2c_device(&mut self, bus: Self::Bus) -> Result<(), Self::Error> {
        M::close_i2c_device(self, bus)
    }
}

/// Manages exactly one named I2C bus that can be held by one device at a time.
///
/// # Example
///
/// ```ignore
/// let mut manager = SingleBusManager::new("I2C1", i2c);
/// let driver = DisplayDriver::open(&mut manager, &DisplayConfig::default())?;
/// ```
pub struct SingleBusManager<I2C> {
    name: &'static str,
    bus: Option<I2C>,
}

impl<I2C> SingleBusManager<I2C> {
    pub fn new(name: &'static str, bus: I2C) -> Self {
        Self {
            name,
            bus: Some(bus),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `true` while the bus is handed out.
    pub fn is_open(&self) -> bool {
        self.bus.is_none()
    }

    /// Recover the bus. Returns `None` while it is handed out.
    pub fn into_inner(self) -> Option<I2C> {
        self.bus
    }
}

impl<I2C> PeripheralManager for SingleBusManager<I2C>
where
    I2C: I2c,
{
    type Bus = I2C;
    type Error = PeripheralError;

    fn open_i2c_device(&mut self, bus_name: &str, _address: u8) -> Result<I2C, PeripheralError> {
        if bus_name != self.name {
            return Err(PeripheralError::UnknownBus);
        }
        self.bus.take().ok_or(PeripheralError::BusInUse)
    }

    fn close_i2c_device(&mut self, bus: I2C) -> Result<(), PeripheralError> {
        if self.bus.is_some() {
            return Err(PeripheralError::BusNotOpen);
        }
        self.bus = Some(bus);
        Ok(())
    }
}
