//! Console UART receive task
//!
//! Moves received bytes into the input channel for the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::INPUT_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Serial RX task - forwards console bytes to the controller
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    // Wait for room rather than drop keystrokes; the UART ring
                    // buffer absorbs bursts meanwhile
                    INPUT_CHANNEL.send(byte).await;
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
