//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in placard-core:
//!
//! - VFD character display (HD44780-compatible 4-bit bus with brightness)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod vfd;
