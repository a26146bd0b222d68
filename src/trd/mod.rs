//! Core `.trd` decoding engine.
//!
//! - [`types`]: error type, header/index models, decoded record model
//! - [`codec`]: 6-bit packed strings and the static symbol tables
//! - [`format`]: container header, record index and record grammar
//! - [`output`]: markup styles for the `headword<TAB>definition` lines
//! - [`reader`] and [`iter`]: container handle and sequential access

pub mod codec;
pub mod format;
pub mod iter;
pub mod output;
pub mod reader;
pub mod types;
