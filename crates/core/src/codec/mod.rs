//! Keystream generation and symbol alphabets.
//!
//! This module contains:
//! - `arcfour`: RC4 keystream engine and incremental key schedule
//! - `alphabet`: base-32, hex and raw output alphabets

pub mod alphabet;
pub mod arcfour;

pub use alphabet::{Alphabet, BASE32_CUSTOM, HEX_UPPER};
pub use arcfour::{Arcfour, KeySchedule};
