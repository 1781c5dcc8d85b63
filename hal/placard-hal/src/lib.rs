//! Placard Hardware Abstraction Layer
//!
//! Chip-independent pieces shared between the board-agnostic core and the
//! chip-specific HALs:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  placard-firmware                       │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │  placard-core    │   │ placard-hal-     │
//! │                  │   │    rp2040        │
//! └──────────────────┘   └──────────────────┘
//!           │                     │
//!           └──────────┬──────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  placard-hal (this crate)               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! - [`storage::NvMemory`] - byte-addressable persistent memory
//! - [`storage::MemoryImage`] - staged RAM copy of a memory persisted whole
//! - [`uart::SerialConfig`] - console line framing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod storage;
pub mod uart;

// Re-export key types at crate root for convenience
pub use storage::{MemoryImage, NvMemory, RamMemory, StorageError, StorageKey};
pub use uart::SerialConfig;
