//! Countdown worker task and its lifecycle control handle.
//!
//! One task owns the [`DisplayDriver`] and performs every bus write. Other
//! contexts steer it through a shared [`CountdownControl`].

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::display::{DisplayDriver, TickOutcome};
use crate::peripheral::PeripheralManager;

/// Host lifecycle requests forwarded to the countdown task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    Start,
    Stop,
    Close,
}

/// Shared handle used by the host to start, stop and close the countdown.
///
/// None of the methods block. After [`stop()`](Self::stop) returns no new
/// tick begins; a tick already writing to the bus may still complete.
///
/// ```ignore
/// static CONTROL: CountdownControl = CountdownControl::new();
///
/// CONTROL.start();
/// // ...
/// CONTROL.stop();
/// ```
pub struct CountdownControl {
    events: Signal<CriticalSectionRawMutex, LifecycleEvent>,
    running: AtomicBool,
}

impl Default for CountdownControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownControl {
    pub const fn new() -> Self {
        Self {
            events: Signal::new(),
            running: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
        self.events.signal(LifecycleEvent::Start);
    }

    /// Cancel the pending tick and power the display down.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.events.signal(LifecycleEvent::Stop);
    }

    /// Stop and release the bus. The task returns afterwards.
    pub fn close(&self) {
        self.running.store(false, Ordering::Release);
        self.events.signal(LifecycleEvent::Close);
    }

    /// Cancellation flag checked before every tick.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    async fn next_event(&self) -> LifecycleEvent {
        self.events.wait().await
    }
}

/// Countdown worker loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Embassy tasks
/// cannot be generic, so wrap it in a concrete task:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn display_task(
///     driver: DisplayDriver<MyI2c>,
///     manager: SingleBusManager<MyI2c>,
///     control: &'static CountdownControl,
/// ) {
///     countdown_task(driver, manager, control).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Wait for a [`LifecycleEvent`].
/// 2. `Start` — configure the chip, then tick every `tick_period_ms` until
///    the countdown finishes, a write fails, or another event arrives.
/// 3. `Stop` — power the chip down and go back to waiting.
/// 4. `Close` — power down, release the bus, return.
///
/// # Errors
///
/// * Configuration failure: logged, nothing is scheduled, waits for the
///   next event.
/// * Display write failure: logged, ticking halts until the next `Start`.
pub async fn countdown_task<I2C, M>(
    mut driver: DisplayDriver<I2C>,
    mut manager: M,
    control: &'static CountdownControl,
) where
    I2C: I2c,
    M: PeripheralManager<Bus = I2C>,
{
    let period = Duration::from_millis(driver.config().tick_period_ms);
    let mut pending: Option<LifecycleEvent> = None;

    loop {
        let event = match pending.take() {
            Some(event) => event,
            None => control.next_event().await,
        };

        match event {
            LifecycleEvent::Start => {
                if let Err(_e) = driver.start().await {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Start failed: {}", _e);
                    continue;
                }
                pending = run_countdown(&mut driver, control, period).await;
            }
            LifecycleEvent::Stop => driver.stop().await,
            LifecycleEvent::Close => {
                driver.close(&mut manager).await;
                #[cfg(feature = "defmt")]
                defmt::info!("Countdown task closed");
                return;
            }
        }
    }
}

/// Tick until the countdown ends or a lifecycle event interrupts it.
///
/// Returns the interrupting event, or `None` if ticking ended on its own.
async fn run_countdown<I2C>(
    driver: &mut DisplayDriver<I2C>,
    control: &CountdownControl,
    period: Duration,
) -> Option<LifecycleEvent>
where
    I2C: I2c,
{
    loop {
        if !control.is_running() {
            return None;
        }

        match driver.tick().await {
            Ok(TickOutcome::Displayed(_)) => {}
            Ok(TickOutcome::Finished) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Countdown finished");
                return None;
            }
            Ok(TickOutcome::Idle) => return None,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Refresh halted: {}", _e);
                return None;
            }
        }

        match select(Timer::after(period), control.next_event()).await {
            Either::First(()) => {}
            Either::Second(event) => return Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::future::Future;

    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embedded_hal_async::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;
    use crate::config::DisplayConfig;
    use crate::mocks::{command, config_from, digit_writes, power_down, start_sequence};
    use crate::peripheral::SingleBusManager;

    fn every_ms(countdown_from: i32, tick_period_ms: u64) -> DisplayConfig {
        DisplayConfig {
            tick_period_ms,
            ..config_from(countdown_from)
        }
    }

    /// Run the task against a mock bus while `host` drives `control`.
    /// Returns once the task has exited and checks the bus came back.
    fn run_task<F>(
        expectations: &[I2cTransaction],
        config: &DisplayConfig,
        control: &'static CountdownControl,
        host: F,
    ) where
        F: Future<Output = ()>,
    {
        let mut manager = SingleBusManager::new("I2C1", I2cMock::new(expectations));
        let driver = DisplayDriver::open(&mut manager, config).unwrap();

        block_on(join(countdown_task(driver, &mut manager, control), host));

        assert!(!manager.is_open());
        manager.into_inner().unwrap().done();
    }

    async fn sleep_ms(ms: u64) {
        Timer::after(Duration::from_millis(ms)).await;
    }

    #[test]
    fn stop_cancels_pending_tick() {
        static CONTROL: CountdownControl = CountdownControl::new();

        let mut expectations = start_sequence();
        expectations.extend(digit_writes(5));
        expectations.extend(digit_writes(4));
        expectations.extend(power_down());

        run_task(&expectations, &every_ms(5, 200), &CONTROL, async {
            CONTROL.start();
            sleep_ms(300).await;
            CONTROL.stop();
            // Long enough for two more ticks had the stop been missed.
            sleep_ms(500).await;
            CONTROL.close();
        });
    }

    #[test]
    fn runs_to_completion_then_powers_down_on_close() {
        static CONTROL: CountdownControl = CountdownControl::new();

        let mut expectations = start_sequence();
        for count in [2, 1, 0] {
            expectations.extend(digit_writes(count));
        }
        expectations.extend(power_down());

        run_task(&expectations, &every_ms(2, 10), &CONTROL, async {
            CONTROL.start();
            sleep_ms(200).await;
            CONTROL.close();
        });
    }

    #[test]
    fn configuration_failure_never_ticks() {
        static CONTROL: CountdownControl = CountdownControl::new();

        let expectations = [command(0x21).with_error(ErrorKind::Other)];

        run_task(&expectations, &every_ms(5, 10), &CONTROL, async {
            CONTROL.start();
            sleep_ms(100).await;
            CONTROL.close();
        });
    }

    #[test]
    fn write_failure_halts_ticking() {
        static CONTROL: CountdownControl = CountdownControl::new();

        let failing = digit_writes(5)
            .into_iter()
            .next()
            .unwrap()
            .with_error(ErrorKind::Bus);
        let mut expectations = start_sequence();
        expectations.push(failing);
        expectations.extend(power_down());

        run_task(&expectations, &every_ms(5, 10), &CONTROL, async {
            CONTROL.start();
            sleep_ms(100).await;
            CONTROL.close();
        });
    }

    #[test]
    fn close_while_running_releases_bus() {
        static CONTROL: CountdownControl = CountdownControl::new();

        let mut expectations = start_sequence();
        expectations.extend(digit_writes(5));
        expectations.extend(power_down());

        run_task(&expectations, &every_ms(5, 200), &CONTROL, async {
            CONTROL.start();
            sleep_ms(50).await;
            CONTROL.close();
        });
        assert!(!CONTROL.is_running());
    }

    #[test]
    fn close_before_start_sends_nothing() {
        static CONTROL: CountdownControl = CountdownControl::new();

        run_task(&[], &every_ms(5, 10), &CONTROL, async {
            CONTROL.close();
        });
    }

    #[test]
    fn control_starts_idle() {
        let control = CountdownControl::new();
        assert!(!control.is_running());
        assert!(!control.events.signaled());
    }

    #[test]
    fn start_sets_flag_and_signals() {
        let control = CountdownControl::new();
        control.start();
        assert!(control.is_running());
        assert_eq!(control.events.try_take(), Some(LifecycleEvent::Start));
    }

    #[test]
    fn stop_clears_flag_and_replaces_pending_start() {
        let control = CountdownControl::new();
        control.start();
        control.stop();
        assert!(!control.is_running());
        assert_eq!(control.events.try_take(), Some(LifecycleEvent::Stop));
        assert_eq!(control.events.try_take(), None);
    }

    #[test]
    fn stop_twice_is_harmless() {
        let control = CountdownControl::new();
        control.stop();
        control.stop();
        assert!(!control.is_running());
        assert_eq!(control.events.try_take(), Some(LifecycleEvent::Stop));
    }

    #[test]
    fn close_clears_flag() {
        let control = CountdownControl::new();
        control.start();
        control.close();
        assert!(!control.is_running());
        assert_eq!(control.events.try_take(), Some(LifecycleEvent::Close));
    }
}
