//! Control bytes used on the console

/// End of text; terminates a text field like carriage return
pub const ETX: u8 = 0x03;

/// Backspace as echoed back to the terminal
pub const BACKSPACE: u8 = 0x08;

/// Line feed (ignored on input)
pub const LF: u8 = 0x0A;

/// Carriage return; terminates numeric and text fields
pub const CR: u8 = 0x0D;

/// Escape; leaves the current submenu
pub const ESC: u8 = 0x1B;

/// Delete; destructive backspace in text fields
pub const DEL: u8 = 0x7F;

/// Printable ASCII accepted into text fields
pub const fn is_printable(byte: u8) -> bool {
    byte >= 0x20 && byte < DEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_range() {
        assert!(is_printable(b' '));
        assert!(is_printable(b'~'));
        assert!(is_printable(b'A'));
        assert!(!is_printable(DEL));
        assert!(!is_printable(CR));
        assert!(!is_printable(ESC));
        assert!(!is_printable(0xC3));
    }
}
