//! Serial console trait
//!
//! The console is both the menu's input/output stream and the source of
//! cancellation for every wait in the firmware: a sleep ends early as soon
//! as an input byte is available. The byte itself stays queued for the menu.

use core::fmt::{self, Write as _};

use heapless::String;

/// Capacity of a single formatted console line
pub const LINE_CAPACITY: usize = 128;

/// Errors from console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Transmitter rejected the write
    Write,
}

/// Why a cancellable sleep returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wake {
    /// The full duration passed without input
    Elapsed,
    /// Input became available before the deadline
    Input,
}

/// Line-oriented serial console with cancellable sleep
pub trait Console {
    /// Whether at least one input byte is waiting
    fn input_pending(&mut self) -> bool;

    /// Wait for and consume the next input byte
    fn read_byte(&mut self) -> impl core::future::Future<Output = u8>;

    /// Write raw bytes to the host
    fn write(
        &mut self,
        bytes: &[u8],
    ) -> impl core::future::Future<Output = Result<(), ConsoleError>>;

    /// Sleep for `ms` milliseconds, returning early if input arrives
    ///
    /// Returns immediately with [`Wake::Input`] if input is already pending.
    fn sleep_ms(&mut self, ms: u32) -> impl core::future::Future<Output = Wake>;
}

/// Text helpers on top of [`Console`]
pub trait ConsoleExt: Console {
    /// Write a string
    fn write_str(
        &mut self,
        text: &str,
    ) -> impl core::future::Future<Output = Result<(), ConsoleError>> {
        self.write(text.as_bytes())
    }

    /// Write a carriage return and line feed
    fn newline(&mut self) -> impl core::future::Future<Output = Result<(), ConsoleError>> {
        self.write(b"\r\n")
    }

    /// Format into a line buffer and write it
    ///
    /// Output longer than [`LINE_CAPACITY`] is cut off.
    fn print(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> impl core::future::Future<Output = Result<(), ConsoleError>> {
        let mut line: String<LINE_CAPACITY> = String::new();
        let _ = line.write_fmt(args);
        async move { self.write(line.as_bytes()).await }
    }
}

impl<C: Console> ConsoleExt for C {}
