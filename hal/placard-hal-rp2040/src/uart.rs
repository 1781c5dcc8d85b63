//! Console UART configuration
//!
//! The console runs on UART0 (GPIO0 TX, GPIO1 RX on the Pico).

use embassy_rp::uart;
use placard_hal::uart::{DataBits, Parity, SerialConfig, StopBits};

/// Translate the line configuration into an embassy-rp UART config
pub fn uart_config(serial: &SerialConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = serial.baudrate;
    config.data_bits = match serial.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match serial.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match serial.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}
