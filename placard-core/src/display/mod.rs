//! Message rendering on a character display
//!
//! Short messages are drawn directly across the rows; longer ones scroll
//! right to left through a single row.

pub mod brightness;
mod driver;

pub use brightness::brightness_for;
pub use driver::{MessageDisplay, RenderOutcome, MAX_COLS};
