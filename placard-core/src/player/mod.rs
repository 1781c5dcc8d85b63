//! Schedule player
//!
//! Walks the six schedule entries in order, showing each referenced message
//! for its duration. Any input aborts the pass; the next pass starts over
//! from the first entry.

mod executor;

pub use executor::{PassOutcome, Player, PlayerState};
