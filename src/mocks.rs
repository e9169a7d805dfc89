//! Expected-transaction builders shared by the driver and task tests.

extern crate std;

use std::vec;
use std::vec::Vec;

use embedded_hal_mock::eh1::i2c::Transaction as I2cTransaction;

use crate::config::DisplayConfig;
use crate::encoding::encode_count;
use crate::registers::DIGIT_REGISTERS;

pub const ADDR: u8 = 0x70;

/// A single command byte write.
pub fn command(byte: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![byte])
}

/// Oscillator on, display on without blink, full brightness.
pub fn start_sequence() -> Vec<I2cTransaction> {
    vec![command(0x21), command(0x81), command(0xEF)]
}

/// Display off, oscillator off.
pub fn power_down() -> Vec<I2cTransaction> {
    vec![command(0x80), command(0x20)]
}

/// The four register writes that show `count`.
pub fn digit_writes(count: i32) -> Vec<I2cTransaction> {
    let codes = encode_count(count).unwrap();
    DIGIT_REGISTERS
        .iter()
        .zip(codes.iter())
        .map(|(&reg, &code)| {
            let [lo, hi] = code.to_le_bytes();
            I2cTransaction::write(ADDR, vec![reg, lo, hi])
        })
        .collect()
}

pub fn config_from(countdown_from: i32) -> DisplayConfig {
    DisplayConfig {
        countdown_from,
        ..DisplayConfig::default()
    }
}
