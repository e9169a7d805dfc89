//! Async countdown driver for an HT16K33 4-digit 7-segment backpack.
//!
//! This crate provides [`DisplayDriver`], which configures the HT16K33 over
//! any `embedded-hal-async` I2C implementation and advances a decimal
//! countdown one step per tick, and (behind the `task` feature)
//! [`countdown_task`], an Embassy worker loop that ticks every 100 ms and
//! can be stopped from another task through [`CountdownControl`].
//!
//! # Architecture
//!
//! - **`encoding`** — digit to 16-bit segment code table and zero padding.
//! - **`driver`** (crate-private) — command byte and register word writes.
//! - **[`DisplayDriver`]** — open / start / tick / stop / close lifecycle.
//! - **[`PeripheralManager`]** — where the I2C device comes from and goes
//!   back to.
//!
//! # Quick Start
//!
//! ```ignore
//! use ht16k33_countdown::{countdown_task, CountdownControl, DisplayConfig, DisplayDriver, SingleBusManager};
//!
//! static CONTROL: CountdownControl = CountdownControl::new();
//!
//! // In your Embassy main:
//! let mut manager = SingleBusManager::new("I2C1", i2c);
//! let driver = DisplayDriver::open(&mut manager, &DisplayConfig::default()).unwrap();
//! spawner.spawn(display_task(driver, manager, &CONTROL)).unwrap();
//! CONTROL.start();
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`] and `defmt::Format`
//!   implementations for the public types.
//! - **`task`** — the Embassy [`countdown_task`] and [`CountdownControl`].

#![no_std]

pub mod config;
#[cfg(feature = "task")]
pub mod countdown_task;
pub mod display;
mod driver;
pub mod encoding;
pub mod error;
#[cfg(test)]
mod mocks;
pub mod peripheral;
pub mod registers;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use config::{BlinkRate, DisplayConfig};
#[cfg(feature = "task")]
pub use countdown_task::{countdown_task, CountdownControl, LifecycleEvent};
pub use display::{DisplayDriver, DriverState, TickOutcome};
pub use encoding::{encode, encode_count, format_count, SegmentCode};
pub use error::{DisplayError, EncodingError, PeripheralError};
pub use peripheral::{PeripheralManager, SingleBusManager};
pub use registers::{DEFAULT_ADDRESS, DEFAULT_BUS_NAME};
