//! Container format parsing layer for Lingea `.trd` dictionaries.
//!
//! # Module Organization
//!
//! - [`header`]: Parses the copyright banner and the 16 header words
//! - [`index`]: Resolves the two-level record index into absolute offsets
//! - [`fields`]: Flag-bit tables describing the optional record fields
//! - [`record`]: Walks one record's bytes into a [`DecodedRecord`](crate::DecodedRecord)
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Banner + words │ ← header::parse()
//! ├─────────────────┤
//! │  Index bases    │ ← index::resolve()
//! │  Offset pages   │
//! ├─────────────────┤
//! │  Record bodies  │ ← RecordDecoder::decode()
//! │  (6-bit packed, │
//! │   zero padded)  │
//! └─────────────────┘
//! ```

pub mod fields;
pub mod header;
pub mod index;
pub mod record;
