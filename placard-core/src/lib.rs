//! Board-agnostic core logic for the message display firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (console, character display, light sensor)
//! - Persistent store layout for messages and the schedule
//! - Display driver (direct and scrolling rendering, brightness tiers)
//! - Schedule player
//! - Menu controller and session state
//! - Tunables

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod error;
pub mod menu;
pub mod player;
pub mod store;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
