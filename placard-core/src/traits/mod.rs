//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and board-specific implementations.

pub mod console;
pub mod display;
pub mod sensor;

pub use console::{Console, ConsoleError, ConsoleExt, Wake};
pub use display::{Brightness, CharacterDisplay, DisplayError};
pub use sensor::LightSensor;
