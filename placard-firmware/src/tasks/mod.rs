//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod serial_rx;

pub use controller::{controller_task, BoardController};
pub use serial_rx::serial_rx_task;
