//! Placard - Message Display Firmware
//!
//! Cycles stored messages on a VFD character display according to a stored
//! schedule. A serial menu on UART0 views and edits the messages and the
//! schedule, and pushes instant messages.
//!
//! Pin assignments (Raspberry Pi Pico):
//! - UART0 TX/RX: GPIO0/GPIO1
//! - VFD RS, E: GPIO2, GPIO3
//! - VFD D4..D7: GPIO4..GPIO7
//! - Light sensor divider: GPIO26 (ADC0)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use placard_core::display::MessageDisplay;
use placard_core::menu::Controller;
use placard_core::store::Store;
use placard_drivers::vfd::{Vfd, VfdPins};
use placard_hal::SerialConfig;
use placard_hal_rp2040::adc::AmbientLight;
use placard_hal_rp2040::flash::EepromEmulation;
use placard_hal_rp2040::uart::uart_config;

use crate::console::UartConsole;

mod channels;
mod config;
mod console;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Placard firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Console UART
    let serial = SerialConfig::with_baudrate(config::SERIAL_BAUD);
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!(
        "Console UART at {} baud ({} us/byte)",
        serial.baudrate,
        serial.byte_time_us()
    );

    // VFD on a 4-bit bus
    let pins = VfdPins {
        rs: Output::new(p.PIN_2, Level::Low),
        en: Output::new(p.PIN_3, Level::Low),
        data: [
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
        ],
    };
    let mut vfd = Vfd::new(pins, Delay, config::DISPLAY_COLS, config::DISPLAY_ROWS);
    match vfd.init() {
        Ok(()) => info!(
            "VFD initialized ({}x{})",
            config::DISPLAY_COLS,
            config::DISPLAY_ROWS
        ),
        Err(e) => warn!("VFD init failed: {:?}", e),
    }

    // Ambient light on ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let ldr = adc::Channel::new_pin(p.PIN_26, Pull::None);
    let light = AmbientLight::new(adc, ldr);

    // Message store in the last 64KB of flash
    let store = Store::new(EepromEmulation::new(p.FLASH, p.DMA_CH0));

    let display = MessageDisplay::new(vfd, &config::TUNABLES, config::BRIGHTNESS);
    let controller: tasks::BoardController = Controller::new(
        store,
        display,
        UartConsole::new(tx),
        light,
        config::TUNABLES,
    );

    // Spawn tasks
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::controller_task(controller)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
