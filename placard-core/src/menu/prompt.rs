//! Field entry over the console
//!
//! Each helper echoes what the protocol editors accept and returns
//! [`Entry::Escaped`] when the user presses escape.

use placard_protocol::{FieldEvent, NumberField, TextField, BACKSPACE, CR, ESC, LF};

use crate::store::{Slot, SLOT_COUNT};
use crate::traits::{Console, ConsoleError, ConsoleExt};

/// Result of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Entry<T> {
    /// User supplied a value
    Value(T),
    /// User pressed escape
    Escaped,
}

/// Echo a field event back to the terminal
async fn echo<C: Console>(console: &mut C, event: FieldEvent) -> Result<(), ConsoleError> {
    match event {
        FieldEvent::Echo(byte) => console.write(&[byte]).await,
        FieldEvent::Erase => console.write(&[BACKSPACE, b' ', BACKSPACE]).await,
        FieldEvent::Done | FieldEvent::Cancelled => console.newline().await,
        FieldEvent::Ignored => Ok(()),
    }
}

/// Read a line of text into `field`
pub async fn read_text<C: Console>(
    console: &mut C,
    field: &mut TextField,
) -> Result<Entry<()>, ConsoleError> {
    field.reset();
    loop {
        let event = field.feed(console.read_byte().await);
        echo(console, event).await?;
        match event {
            FieldEvent::Done => return Ok(Entry::Value(())),
            FieldEvent::Cancelled => return Ok(Entry::Escaped),
            _ => {}
        }
    }
}

/// Read a decimal number
async fn read_number<C: Console>(console: &mut C) -> Result<Entry<u32>, ConsoleError> {
    let mut field = NumberField::new();
    loop {
        let event = field.feed(console.read_byte().await);
        echo(console, event).await?;
        match event {
            FieldEvent::Done => return Ok(Entry::Value(field.value())),
            FieldEvent::Cancelled => return Ok(Entry::Escaped),
            _ => {}
        }
    }
}

/// Prompt for a number in `0..=max`, re-prompting until one is entered
pub async fn read_ranged<C: Console>(
    console: &mut C,
    prompt: &str,
    max: u8,
) -> Result<Entry<u8>, ConsoleError> {
    loop {
        console.write_str(prompt).await?;
        match read_number(console).await? {
            Entry::Escaped => return Ok(Entry::Escaped),
            Entry::Value(value) => match u8::try_from(value) {
                Ok(value) if value <= max => return Ok(Entry::Value(value)),
                _ => {
                    console
                        .print(format_args!("Out of range, enter 0-{}\r\n", max))
                        .await?
                }
            },
        }
    }
}

/// Prompt for a slot as a single keypress
pub async fn read_slot_key<C: Console>(
    console: &mut C,
    prompt: &str,
) -> Result<Entry<Slot>, ConsoleError> {
    console.write_str(prompt).await?;
    loop {
        let key = console.read_byte().await;
        match key {
            ESC => {
                console.newline().await?;
                return Ok(Entry::Escaped);
            }
            // Stray line endings from the previous field
            CR | LF => {}
            b'0'..=b'9' => {
                if let Some(slot) = Slot::new(usize::from(key - b'0')) {
                    console.write(&[key]).await?;
                    console.newline().await?;
                    return Ok(Entry::Value(slot));
                }
                console
                    .print(format_args!("\r\nPick 0-{}: ", SLOT_COUNT - 1))
                    .await?;
            }
            _ => {
                console
                    .print(format_args!("\r\nPick 0-{}: ", SLOT_COUNT - 1))
                    .await?;
            }
        }
    }
}
