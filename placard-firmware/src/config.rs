//! Board configuration
//!
//! Generated from `placard.toml` by the build script.

use placard_core::config::{BrightnessThresholds, Tunables};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
