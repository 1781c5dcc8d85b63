//! Fixed menu text

use placard_protocol::MenuChoice;

use crate::store::{Message, ScheduleEntry, Slot};
use crate::traits::{Console, ConsoleError, ConsoleExt};

/// Title line of the banner
pub const TITLE: &str = "Placard message display";

/// Prompt shown after the banner and after each action
pub const PROMPT: &str = "> ";

pub async fn banner<C: Console>(console: &mut C) -> Result<(), ConsoleError> {
    console.write_str("\r\n").await?;
    console.write_str(TITLE).await?;
    console.newline().await?;
    for choice in MenuChoice::ALL {
        console
            .print(format_args!("  {}) {}\r\n", char::from(choice.key()), choice.label()))
            .await?;
    }
    console.write_str("ESC returns here\r\n").await?;
    console.write_str(PROMPT).await
}

pub async fn message_line<C: Console>(
    console: &mut C,
    slot: Slot,
    text: &Message,
) -> Result<(), ConsoleError> {
    console
        .print(format_args!("String {}: {}\r\n", slot, text))
        .await
}

pub async fn schedule_line<C: Console>(
    console: &mut C,
    slot: Slot,
    entry: &ScheduleEntry,
) -> Result<(), ConsoleError> {
    console
        .print(format_args!(
            "Slot {}: message {}, {} s\r\n",
            slot, entry.message, entry.duration_s
        ))
        .await
}
