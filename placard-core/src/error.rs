//! Unified error type for core operations

use placard_hal::StorageError;

use crate::traits::{ConsoleError, DisplayError};

/// Errors surfaced by store, display, player and menu operations
///
/// None of these are shown to the user; the firmware logs them and keeps
/// running the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Non-volatile memory access failed
    Storage(StorageError),
    /// Character display rejected a command
    Display(DisplayError),
    /// Serial console write failed
    Console(ConsoleError),
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<ConsoleError> for Error {
    fn from(e: ConsoleError) -> Self {
        Error::Console(e)
    }
}
