//! HT16K33 command and display-RAM constants for a 4-digit 7-segment backpack.
//!
//! Commands are single bytes: the high nibble selects the command and the
//! low nibble carries its parameter, e.g. `DIMMING | 0x0F` for full
//! brightness. Display RAM is written as `[register, low_byte, high_byte]`.

// ---------------------------------------------------------------------------
// Command opcodes
// ---------------------------------------------------------------------------

/// System setup command. Bit 0 turns the internal oscillator on (`1`) or
/// puts the chip in standby (`0`).
pub const SYSTEM_SETUP: u8 = 0x20;

/// Display setup command: `1000_0BBD` with `BB` the blink rate and `D`
/// display on/off.
pub const DISPLAY_SETUP: u8 = 0x80;

/// Dimming command: `1110_PPPP` with `PPPP` the brightness level.
pub const DIMMING: u8 = 0xE0;

// ---------------------------------------------------------------------------
// Command parameters
// ---------------------------------------------------------------------------

pub const OSCILLATOR_ON: u8 = 0x01;
pub const OSCILLATOR_OFF: u8 = 0x00;

pub const DISPLAY_ON: u8 = 0x01;
pub const DISPLAY_OFF: u8 = 0x00;

/// Highest dimming level accepted by the chip (16/16 duty).
pub const MAX_BRIGHTNESS: u8 = 0x0F;

// ---------------------------------------------------------------------------
// Display RAM
// ---------------------------------------------------------------------------

/// Number of digit positions driven by the backpack.
pub const DIGIT_COUNT: usize = 4;

/// Display RAM offsets for digits 1-4, most to least significant.
pub const DIGIT_REGISTERS: [u8; DIGIT_COUNT] = [0x00, 0x02, 0x04, 0x06];

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of the HT16K33 (all address jumpers open).
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Default name of the bus the backpack is wired to.
pub const DEFAULT_BUS_NAME: &str = "I2C1";

/// Delay between two refresh ticks.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 100;

/// Value the countdown starts from unless configured otherwise.
pub const DEFAULT_COUNTDOWN_FROM: i32 = 1000;
