//! Main controller task
//!
//! Owns the store, display, light sensor and console, and runs the menu and
//! schedule player loop.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Timer};

use placard_core::menu::{Activity, Controller};
use placard_core::player::PassOutcome;
use placard_drivers::vfd::Vfd;
use placard_hal_rp2040::adc::AmbientLight;
use placard_hal_rp2040::flash::EepromEmulation;

use crate::console::UartConsole;

/// Back-off after a failed loop step so a dead device does not spin the loop
const ERROR_BACKOFF_MS: u64 = 1_000;

/// Controller wired to this board's peripherals
pub type BoardController = Controller<
    EepromEmulation<'static>,
    Vfd<Output<'static>, Delay>,
    UartConsole,
    AmbientLight<'static>,
>;

/// Controller task - main loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: BoardController) {
    info!("Controller task started");

    match controller.boot().await {
        Ok(true) => info!("Store was blank, defaults written"),
        Ok(false) => info!("Store loaded"),
        Err(e) => warn!("Boot failed: {:?}", e),
    }

    loop {
        match controller.poll().await {
            Ok(Activity::Menu(Some(choice))) => debug!("Menu: {:?}", choice),
            Ok(Activity::Menu(None)) => trace!("Ignored key"),
            Ok(Activity::Pass(PassOutcome::Completed { rendered })) => {
                trace!("Pass complete, {} shown", rendered)
            }
            Ok(Activity::Pass(PassOutcome::Interrupted { slot })) => {
                debug!("Pass interrupted at slot {}", slot)
            }
            Ok(Activity::Idle) => trace!("Idle"),
            Err(e) => {
                warn!("Controller error: {:?}", e);
                Timer::after_millis(ERROR_BACKOFF_MS).await;
            }
        }
    }
}
