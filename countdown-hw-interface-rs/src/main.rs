//! countdown-hw-interface
//!
//! HT16K33 countdown firmware for the Raspberry Pi Pico 2. Plays the host
//! role around the `ht16k33-countdown` library:
//!
//! 1. Opens the 7-segment backpack on I2C1 and spawns the countdown task,
//!    which owns the driver and every bus write from then on.
//! 2. Starts the countdown: 1000 → 0, one step every 100 ms.
//! 3. The button task toggles stop/start on each press of an active-low
//!    push button. Stopping powers the backpack down; starting resumes
//!    from the last value shown.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use ht16k33_countdown::{
    countdown_task, CountdownControl, DisplayConfig, DisplayDriver, SingleBusManager,
    DEFAULT_BUS_NAME,
};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C1 peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Lifecycle handle shared by `main`, the button task and the countdown task.
static CONTROL: CountdownControl = CountdownControl::new();

/// Ignore contact bounce for this long after a press.
const DEBOUNCE: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete I2C type for the backpack. The bus is not shared.
type DisplayI2c = I2c<'static, I2C1, i2c::Async>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `countdown_task` so it can be
/// spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn display_task(
    driver: DisplayDriver<DisplayI2c>,
    manager: SingleBusManager<DisplayI2c>,
    control: &'static CountdownControl,
) {
    countdown_task(driver, manager, control).await;
}

/// Toggle the countdown on each button press.
#[embassy_executor::task]
async fn button_task(mut button: Input<'static>, control: &'static CountdownControl) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;

        if control.is_running() {
            info!("Button: stop");
            control.stop();
        } else {
            info!("Button: start");
            control.start();
        }

        Timer::after(DEBOUNCE).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("countdown-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C1_SDA → GP2   (p.PIN_2)
    // I2C1_SCL → GP3   (p.PIN_3)
    // BUTTON   → GP15  (p.PIN_15)  active-low, pull-up enabled
    // ———————————————————————————————————————————————————————————————————————

    let i2c = I2c::new_async(
        p.I2C1,
        p.PIN_3, // SCL
        p.PIN_2, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut manager = SingleBusManager::new(DEFAULT_BUS_NAME, i2c);
    let config = DisplayConfig::default();

    // —— Driver initialisation ——————————————————————————————————————————————

    // A bus that cannot be opened leaves nothing to drive; the rest of the
    // firmware is pointless without it.
    let driver = match DisplayDriver::open(&mut manager, &config) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Cannot open display: {}", e);
            return;
        }
    };

    let button = Input::new(p.PIN_15, Pull::Up);

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(display_task(driver, manager, &CONTROL)).unwrap();
    spawner.spawn(button_task(button, &CONTROL)).unwrap();

    CONTROL.start();
    info!("Countdown from {} started", config.countdown_from);
}
