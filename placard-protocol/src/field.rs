//! Field editors for numeric and text entry
//!
//! Both editors are fed one byte at a time. Each byte yields a
//! [`FieldEvent`] telling the caller what to echo and whether the field is
//! finished.

use heapless::String;

use crate::control::{is_printable, BACKSPACE, CR, DEL, ESC, ETX};

/// Maximum characters in a text field (one message)
pub const MAX_TEXT_LEN: usize = 80;

/// Result of feeding one byte to a field editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldEvent {
    /// Byte was dropped; nothing to echo
    Ignored,
    /// Byte was accepted and should be echoed
    Echo(u8),
    /// Last character was removed; echo a destructive backspace
    Erase,
    /// Terminator received, field is complete
    Done,
    /// Escape received, caller should leave the submenu
    Cancelled,
}

/// Decimal number entry terminated by carriage return
///
/// Non-digit bytes are ignored. The value saturates instead of wrapping, so
/// an absurdly long entry still fails the caller's range check.
#[derive(Debug, Clone, Default)]
pub struct NumberField {
    value: u32,
}

impl NumberField {
    /// Create an empty field
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Feed one input byte
    pub fn feed(&mut self, byte: u8) -> FieldEvent {
        match byte {
            b'0'..=b'9' => {
                self.value = self
                    .value
                    .saturating_mul(10)
                    .saturating_add(u32::from(byte - b'0'));
                FieldEvent::Echo(byte)
            }
            CR => FieldEvent::Done,
            ESC => FieldEvent::Cancelled,
            _ => FieldEvent::Ignored,
        }
    }

    /// Entered value (0 when no digits were typed)
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Text entry terminated by carriage return or ETX
///
/// Accepts printable ASCII up to [`MAX_TEXT_LEN`] characters; anything past
/// the limit is silently dropped. DEL (and BS) remove the last character.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    text: String<MAX_TEXT_LEN>,
}

impl TextField {
    /// Create an empty field
    pub const fn new() -> Self {
        Self { text: String::new() }
    }

    /// Clear the field
    pub fn reset(&mut self) {
        self.text.clear();
    }

    /// Feed one input byte
    pub fn feed(&mut self, byte: u8) -> FieldEvent {
        match byte {
            CR | ETX => FieldEvent::Done,
            ESC => FieldEvent::Cancelled,
            DEL | BACKSPACE => match self.text.pop() {
                Some(_) => FieldEvent::Erase,
                None => FieldEvent::Ignored,
            },
            b if is_printable(b) => match self.text.push(char::from(b)) {
                Ok(()) => FieldEvent::Echo(b),
                Err(()) => FieldEvent::Ignored,
            },
            _ => FieldEvent::Ignored,
        }
    }

    /// Text entered so far
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(field: &mut TextField, bytes: &[u8]) -> FieldEvent {
        let mut last = FieldEvent::Ignored;
        for &b in bytes {
            last = field.feed(b);
        }
        last
    }

    #[test]
    fn test_number_field_digits_until_cr() {
        let mut field = NumberField::new();
        assert_eq!(field.feed(b'4'), FieldEvent::Echo(b'4'));
        assert_eq!(field.feed(b'2'), FieldEvent::Echo(b'2'));
        assert_eq!(field.feed(CR), FieldEvent::Done);
        assert_eq!(field.value(), 42);
    }

    #[test]
    fn test_number_field_ignores_non_digits() {
        let mut field = NumberField::new();
        assert_eq!(field.feed(b'x'), FieldEvent::Ignored);
        assert_eq!(field.feed(b'7'), FieldEvent::Echo(b'7'));
        assert_eq!(field.feed(b'-'), FieldEvent::Ignored);
        assert_eq!(field.feed(ETX), FieldEvent::Ignored);
        assert_eq!(field.value(), 7);
    }

    #[test]
    fn test_number_field_saturates() {
        let mut field = NumberField::new();
        for _ in 0..20 {
            field.feed(b'9');
        }
        assert_eq!(field.value(), u32::MAX);
    }

    #[test]
    fn test_number_field_escape() {
        let mut field = NumberField::new();
        field.feed(b'1');
        assert_eq!(field.feed(ESC), FieldEvent::Cancelled);
    }

    #[test]
    fn test_text_field_terminators() {
        let mut field = TextField::new();
        assert_eq!(feed_all(&mut field, b"Hi\r"), FieldEvent::Done);
        assert_eq!(field.as_str(), "Hi");

        let mut field = TextField::new();
        assert_eq!(feed_all(&mut field, &[b'o', b'k', ETX]), FieldEvent::Done);
        assert_eq!(field.as_str(), "ok");
    }

    #[test]
    fn test_text_field_backspace() {
        let mut field = TextField::new();
        feed_all(&mut field, b"Tesx");
        assert_eq!(field.feed(DEL), FieldEvent::Erase);
        assert_eq!(field.feed(b't'), FieldEvent::Echo(b't'));
        assert_eq!(field.as_str(), "Test");

        let mut empty = TextField::new();
        assert_eq!(empty.feed(DEL), FieldEvent::Ignored);
    }

    #[test]
    fn test_text_field_truncates_at_limit() {
        let mut field = TextField::new();
        for _ in 0..MAX_TEXT_LEN {
            assert_eq!(field.feed(b'a'), FieldEvent::Echo(b'a'));
        }
        assert_eq!(field.feed(b'b'), FieldEvent::Ignored);
        assert_eq!(field.as_str().len(), MAX_TEXT_LEN);
        assert_eq!(field.feed(CR), FieldEvent::Done);
    }

    #[test]
    fn test_text_field_drops_control_and_high_bytes() {
        let mut field = TextField::new();
        assert_eq!(field.feed(0x01), FieldEvent::Ignored);
        assert_eq!(field.feed(0xE9), FieldEvent::Ignored);
        assert_eq!(field.feed(b'\n'), FieldEvent::Ignored);
        assert_eq!(field.as_str(), "");
        assert_eq!(field.feed(ESC), FieldEvent::Cancelled);
    }
}
