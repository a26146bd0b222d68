//! Codec layer for packed character data.
//!
//! # Submodules
//!
//! - [`tables`][]: Alphabets, sub-tables and word classes per format variant
//! - [`compose`][]: Diacritic and phonetic composition maps
//! - [`packed`][]: 6-bit unpacking and symbol-to-text rendering

pub mod compose;
pub mod packed;
pub mod tables;
