//! RP2040-specific HAL for the message display firmware
//!
//! This crate provides RP2040 implementations of the shared traits:
//!
//! - Flash-backed EEPROM emulation (implements `placard_hal::NvMemory`)
//! - Ambient light ADC channel (implements `placard_core::traits::LightSensor`)
//! - UART pin mapping and line configuration

#![no_std]

pub mod adc;
pub mod flash;
pub mod uart;

// Re-export shared types from placard-hal for convenience
pub use placard_hal::{NvMemory, StorageKey};
