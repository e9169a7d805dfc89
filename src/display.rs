//! Countdown display driver for an HT16K33 4-digit backpack.
//!
//! [`DisplayDriver`] holds the I2C device between `open()` and `close()`,
//! configures the chip on `start()`, and advances the countdown one step
//! per [`tick()`](DisplayDriver::tick). Scheduling ticks is left to the
//! caller (see the `countdown_task` module behind the `task` feature).

use embedded_hal_async::i2c::{Error as _, I2c};

use crate::config::{dimming_command, DisplayConfig};
use crate::driver::Ht16k33;
use crate::encoding::{encode_count, MAX_DISPLAY_VALUE};
use crate::error::{DisplayError, EncodingError};
use crate::peripheral::PeripheralManager;
use crate::registers::{
    DIGIT_REGISTERS, DISPLAY_OFF, DISPLAY_SETUP, MAX_BRIGHTNESS, OSCILLATOR_OFF, OSCILLATOR_ON,
    SYSTEM_SETUP,
};

/// Lifecycle state of an open driver.
///
/// A driver that has not been opened does not exist yet, and a closed one
/// has been consumed by [`DisplayDriver::close()`], so only the three
/// in-between states are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Bus acquired, chip not configured.
    Ready,
    /// Chip configured, ticks update the display.
    Running,
    /// Chip powered down; `start()` may resume the countdown.
    Stopped,
}

/// Result of a single refresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The given value was written to the display; schedule the next tick.
    Displayed(i32),
    /// The countdown is exhausted. Nothing was written.
    Finished,
    /// The driver is not running. Nothing was written.
    Idle,
}

/// Async countdown driver for an HT16K33 7-segment backpack.
///
/// # Lifecycle
///
/// 1. [`DisplayDriver::open()`] — acquires the I2C device, no bus traffic.
/// 2. [`DisplayDriver::start()`] — oscillator on, display on, brightness.
/// 3. [`DisplayDriver::tick()`] — shows the current count, then decrements it.
/// 4. [`DisplayDriver::stop()`] — display off, oscillator off.
/// 5. [`DisplayDriver::close()`] — hands the device back to the manager.
///
/// # Example
///
/// ```ignore
/// let mut manager = SingleBusManager::new("I2C1", i2c);
/// let mut display = DisplayDriver::open(&mut manager, &DisplayConfig::default())?;
/// display.start().await?;
/// while let TickOutcome::Displayed(_) = display.tick().await? {
///     Timer::after(Duration::from_millis(100)).await;
/// }
/// display.close(&mut manager).await;
/// ```
pub struct DisplayDriver<I2C> {
    chip: Ht16k33<I2C>,
    config: DisplayConfig,
    state: DriverState,
    count: i32,
}

impl<I2C> DisplayDriver<I2C>
where
    I2C: I2c,
{
    /// Acquire the I2C device named in `config` from `manager`.
    ///
    /// No I2C traffic is generated.
    ///
    /// # Errors
    /// * [`DisplayError::BusUnavailable`] if the manager refuses the bus.
    ///   The caller has to open a new driver; there is no retry.
    /// * [`DisplayError::Encoding`] if `config.countdown_from` does not fit
    ///   on four digits.
    pub fn open<M>(manager: &mut M, config: &DisplayConfig) -> Result<Self, DisplayError>
    where
        M: PeripheralManager<Bus = I2C>,
    {
        if !(0..=MAX_DISPLAY_VALUE).contains(&config.countdown_from) {
            return Err(EncodingError::ValueOutOfRange(config.countdown_from).into());
        }

        let i2c = manager
            .open_i2c_device(config.bus_name, config.address)
            .map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "{} bus slave {=u8:#x} connection cannot be opened",
                    config.bus_name,
                    config.address
                );
                DisplayError::BusUnavailable
            })?;

        Ok(Self {
            chip: Ht16k33::new(i2c, config.address),
            config: *config,
            state: DriverState::Ready,
            count: config.countdown_from,
        })
    }

    /// Configure the chip and enter [`DriverState::Running`].
    ///
    /// Sends, in order: oscillator on, display on (with the configured blink
    /// rate), brightness. Each is a one-byte write. Does nothing if already
    /// running. Resuming from [`DriverState::Stopped`] keeps the current
    /// count.
    ///
    /// # Errors
    /// [`DisplayError::ConfigurationWriteFailed`] on the first rejected
    /// write. The remaining commands are skipped, the oscillator is switched
    /// back off if it was already on, and the state is unchanged.
    pub async fn start(&mut self) -> Result<(), DisplayError> {
        if self.state == DriverState::Running {
            return Ok(());
        }

        let commands = [
            SYSTEM_SETUP | OSCILLATOR_ON,
            self.config.blink_rate.display_on_command(),
            self.config.dimming_command(),
        ];
        for (i, command) in commands.into_iter().enumerate() {
            if let Err(e) = self.chip.write_command(command).await {
                if i > 0 {
                    // Oscillator is already on; put the chip back in standby.
                    self.standby().await;
                }
                return Err(DisplayError::ConfigurationWriteFailed(e.kind()));
            }
        }

        self.state = DriverState::Running;

        #[cfg(feature = "defmt")]
        defmt::info!("HT16K33 at {=u8:#x} running, count={}", self.chip.address(), self.count);

        Ok(())
    }

    /// Show the current count and decrement it.
    ///
    /// Writes one segment code to each of the four digit registers, most
    /// significant first. Returns [`TickOutcome::Idle`] when not running and
    /// [`TickOutcome::Finished`] once the count has dropped below zero;
    /// neither touches the bus.
    ///
    /// # Errors
    /// [`DisplayError::DisplayWriteFailed`] if a register write fails. The
    /// count is left unchanged and the caller should stop ticking.
    pub async fn tick(&mut self) -> Result<TickOutcome, DisplayError> {
        if self.state != DriverState::Running {
            return Ok(TickOutcome::Idle);
        }
        if self.count < 0 {
            return Ok(TickOutcome::Finished);
        }

        let shown = self.count;
        let codes = encode_count(shown)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("display {}", shown);

        for (&register, &code) in DIGIT_REGISTERS.iter().zip(codes.iter()) {
            self.chip
                .write_register_word(register, code)
                .await
                .map_err(|e| DisplayError::DisplayWriteFailed(e.kind()))?;
        }

        self.count -= 1;
        Ok(TickOutcome::Displayed(shown))
    }

    /// Power the chip down and enter [`DriverState::Stopped`].
    ///
    /// Sends display off, then oscillator off. Write failures are logged and
    /// otherwise ignored since the bus may already be gone. Does nothing
    /// unless running, so repeated calls are harmless.
    pub async fn stop(&mut self) {
        if self.state != DriverState::Running {
            return;
        }
        self.state = DriverState::Stopped;

        self.write_best_effort(DISPLAY_SETUP | DISPLAY_OFF).await;
        self.standby().await;

        #[cfg(feature = "defmt")]
        defmt::info!("HT16K33 stopped at count={}", self.count);
    }

    /// Turn the oscillator off. Failures are only logged.
    async fn standby(&mut self) {
        self.write_best_effort(SYSTEM_SETUP | OSCILLATOR_OFF).await;
    }

    async fn write_best_effort(&mut self, command: u8) {
        if let Err(e) = self.chip.write_command(command).await {
            let _err = DisplayError::ShutdownWriteFailed(e.kind());
            #[cfg(feature = "defmt")]
            defmt::warn!("{}", _err);
        }
    }

    /// Stop if needed and hand the I2C device back to `manager`.
    ///
    /// Consumes the driver. A failure to close is logged, not returned: the
    /// device may leak but teardown always completes.
    pub async fn close<M>(mut self, manager: &mut M)
    where
        M: PeripheralManager<Bus = I2C>,
    {
        self.stop().await;

        if manager.close_i2c_device(self.chip.release()).is_err() {
            let _err = DisplayError::CloseFailed;
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{}: {} bus slave {=u8:#x}, next open may fail",
                _err,
                self.config.bus_name,
                self.config.address
            );
        }
    }

    /// Change the dimming level while running.
    ///
    /// The level is clamped to 0-15 and remembered for the next `start()`.
    /// When not running only the stored level changes.
    ///
    /// # Errors
    /// [`DisplayError::ConfigurationWriteFailed`] if the command is rejected.
    pub async fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        let level = level.min(MAX_BRIGHTNESS);
        self.config.brightness = level;
        if self.state != DriverState::Running {
            return Ok(());
        }
        self.chip
            .write_command(dimming_command(level))
            .await
            .map_err(|e| DisplayError::ConfigurationWriteFailed(e.kind()))
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Next value to be displayed. `-1` once the countdown is exhausted.
    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
