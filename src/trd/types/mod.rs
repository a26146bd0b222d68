//! Foundational data structures, error types, and format variant definitions.

pub mod entry;
pub mod error;
pub mod models;
pub mod variant;
