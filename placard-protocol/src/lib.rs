//! Placard serial menu protocol
//!
//! The console is a plain 9600 baud byte stream. There is no framing: the
//! firmware reads single-key menu selections, numeric fields terminated by
//! carriage return, and text fields terminated by carriage return or ETX.
//!
//! ```text
//!  key     meaning
//!  ─────   ─────────────────────────────────
//!  '1'     view messages
//!  '2'     edit a message
//!  '3'     instant message
//!  '4'     edit schedule
//!  '5'     view schedule
//!  '6'     toggle power save
//!  ESC     leave the current submenu
//! ```
//!
//! Field editors are fed one byte at a time and report what the caller
//! should echo.

#![no_std]
#![deny(unsafe_code)]

pub mod control;
pub mod field;
pub mod menu;

pub use control::{is_printable, BACKSPACE, CR, DEL, ESC, ETX, LF};
pub use field::{FieldEvent, NumberField, TextField, MAX_TEXT_LEN};
pub use menu::MenuChoice;
