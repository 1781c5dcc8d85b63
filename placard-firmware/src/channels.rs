//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for console input bytes
const INPUT_CHANNEL_SIZE: usize = 64;

/// Bytes received on the console UART, in arrival order
///
/// Also the cancellation source for every wait in the controller: a
/// non-empty channel ends sleeps early.
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, u8, INPUT_CHANNEL_SIZE> =
    Channel::new();
