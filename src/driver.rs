//! Low-level HT16K33 bus primitives.
//!
//! Two transaction shapes cover everything the countdown needs: a single
//! command byte, and a 16-bit little-endian word written to a display RAM
//! register. Both are plain I2C writes with no read phase.
//!
//! This module is crate-private; consumers use
//! [`DisplayDriver`](crate::DisplayDriver) instead.

use embedded_hal_async::i2c::I2c;

/// Owns the I2C device and the chip address every write targets.
pub(crate) struct Ht16k33<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ht16k33<I2C>
where
    I2C: I2c,
{
    /// # Arguments
    /// * `i2c` — I2C device (takes ownership for exclusive access)
    /// * `address` — 7-bit device address (0x70-0x77)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    #[cfg_attr(not(feature = "defmt"), allow(dead_code))]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Send a single command byte.
    pub async fn write_command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[command]).await
    }

    /// Write a 16-bit value to a display RAM register.
    ///
    /// Sent as `[register, low_byte, high_byte]`; the chip auto-increments
    /// its RAM pointer so the high byte lands at `register + 1`.
    pub async fn write_register_word(&mut self, register: u8, value: u16) -> Result<(), I2C::Error> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c.write(self.address, &[register, lo, hi]).await
    }

    /// Give the I2C device back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    const ADDR: u8 = 0x70;

    #[test]
    fn write_command_sends_one_byte() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x21])];
        let mut i2c = I2cMock::new(&expectations);

        let mut chip = Ht16k33::new(i2c.clone(), ADDR);
        block_on(chip.write_command(0x21)).unwrap();

        i2c.done();
    }

    #[test]
    fn write_register_word_is_little_endian() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x04, 0x69, 0x20])];
        let mut i2c = I2cMock::new(&expectations);

        let mut chip = Ht16k33::new(i2c.clone(), ADDR);
        block_on(chip.write_register_word(0x04, 0x2069)).unwrap();

        i2c.done();
    }

    #[test]
    fn release_returns_device() {
        let chip = Ht16k33::new(I2cMock::new(&[]), ADDR);
        assert_eq!(chip.address(), ADDR);

        let mut released = chip.release();
        released.done();
    }
}
