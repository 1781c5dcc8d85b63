//! Serial menu
//!
//! The [`Controller`] owns every device and runs one step of the main loop
//! per [`Controller::poll`]: either a menu interaction (when input is
//! pending) or a schedule pass.

mod controller;
mod prompt;
mod screens;

pub use controller::{Activity, Controller};
pub use prompt::Entry;
