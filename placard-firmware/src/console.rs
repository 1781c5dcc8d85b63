//! Serial console on the buffered UART

use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;

use placard_core::traits::{Console, ConsoleError, Wake};

use crate::channels::INPUT_CHANNEL;

/// Console that reads from [`INPUT_CHANNEL`] and writes to UART TX
pub struct UartConsole {
    tx: BufferedUartTx,
}

impl UartConsole {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl Console for UartConsole {
    fn input_pending(&mut self) -> bool {
        !INPUT_CHANNEL.is_empty()
    }

    async fn read_byte(&mut self) -> u8 {
        INPUT_CHANNEL.receive().await
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.tx
            .write_all(bytes)
            .await
            .map_err(|_| ConsoleError::Write)
    }

    async fn sleep_ms(&mut self, ms: u32) -> Wake {
        match select(
            Timer::after_millis(u64::from(ms)),
            INPUT_CHANNEL.ready_to_receive(),
        )
        .await
        {
            Either::First(()) => Wake::Elapsed,
            Either::Second(()) => Wake::Input,
        }
    }
}
