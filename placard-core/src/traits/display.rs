//! Character display trait

/// Errors that can occur driving a character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or pin failure while sending a command
    Bus,
    /// Cursor position outside the grid
    InvalidPosition,
}

/// Hardware brightness levels, dimmest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Brightness {
    /// 25%
    Quarter,
    /// 50%
    Half,
    /// 75%
    ThreeQuarters,
    /// 100%
    Full,
}

/// Trait for a fixed-size character grid display
///
/// Rows and columns are zero-based. Text written past the end of a row is
/// dropped by the implementation; callers split text themselves.
pub trait CharacterDisplay {
    /// Grid size as `(columns, rows)`
    fn dimensions(&self) -> (u8, u8);

    /// Clear every cell and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor to the top-left cell
    fn home(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Select a brightness level
    fn set_brightness(&mut self, level: Brightness) -> Result<(), DisplayError>;

    /// Switch the display on or off without losing contents
    fn set_power(&mut self, on: bool) -> Result<(), DisplayError>;
}
