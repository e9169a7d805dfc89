//! Driver and countdown configuration.

use crate::registers::{
    DEFAULT_ADDRESS, DEFAULT_BUS_NAME, DEFAULT_COUNTDOWN_FROM, DEFAULT_TICK_PERIOD_MS,
    DISPLAY_ON, DISPLAY_SETUP, DIMMING, MAX_BRIGHTNESS,
};

/// Hardware blink rate, encoded into the display setup command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BlinkRate {
    #[default]
    Off = 0,
    TwoHz = 1,
    OneHz = 2,
    HalfHz = 3,
}

impl BlinkRate {
    /// Display setup command that turns the display on at this blink rate.
    pub fn display_on_command(self) -> u8 {
        DISPLAY_SETUP | DISPLAY_ON | ((self as u8) << 1)
    }
}

/// Configuration for the driver and the countdown task.
///
/// [`DisplayConfig::default()`] reproduces the stock backpack setup:
/// bus `"I2C1"`, address `0x70`, countdown from 1000 at full brightness,
/// no blinking, one tick every 100 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Name of the I2C bus handed to the peripheral manager. Default: `"I2C1"`.
    pub bus_name: &'static str,
    /// 7-bit device address. Default: `0x70`.
    pub address: u8,
    /// First value shown. Must be within `0..=9999`. Default: 1000.
    pub countdown_from: i32,
    /// Dimming level, 0-15. Larger values are clamped. Default: 15.
    pub brightness: u8,
    /// Default: [`BlinkRate::Off`].
    pub blink_rate: BlinkRate,
    /// Delay between refresh ticks in milliseconds. Default: 100.
    pub tick_period_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bus_name: DEFAULT_BUS_NAME,
            address: DEFAULT_ADDRESS,
            countdown_from: DEFAULT_COUNTDOWN_FROM,
            brightness: MAX_BRIGHTNESS,
            blink_rate: BlinkRate::Off,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl DisplayConfig {
    /// Dimming command for the configured brightness.
    pub fn dimming_command(&self) -> u8 {
        dimming_command(self.brightness)
    }
}

/// Dimming command for `level`, clamped to [`MAX_BRIGHTNESS`].
pub(crate) fn dimming_command(level: u8) -> u8 {
    DIMMING | level.min(MAX_BRIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = DisplayConfig::default();
        assert_eq!(c.bus_name, "I2C1");
        assert_eq!(c.address, 0x70);
        assert_eq!(c.countdown_from, 1000);
        assert_eq!(c.brightness, 15);
        assert_eq!(c.blink_rate, BlinkRate::Off);
        assert_eq!(c.tick_period_ms, 100);
    }

    #[test]
    fn blink_rate_commands() {
        assert_eq!(BlinkRate::Off.display_on_command(), 0x81);
        assert_eq!(BlinkRate::TwoHz.display_on_command(), 0x83);
        assert_eq!(BlinkRate::OneHz.display_on_command(), 0x85);
        assert_eq!(BlinkRate::HalfHz.display_on_command(), 0x87);
    }

    #[test]
    fn dimming_command_clamps() {
        assert_eq!(DisplayConfig::default().dimming_command(), 0xEF);
        let dim = DisplayConfig {
            brightness: 3,
            ..DisplayConfig::default()
        };
        assert_eq!(dim.dimming_command(), 0xE3);
        assert_eq!(dimming_command(200), 0xEF);
    }
}
