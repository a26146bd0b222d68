//! Core data structures for the container-level parts of a .trd file.
//!
//! This module defines:
//! - The fixed header (copyright banner and sixteen header words)
//! - The resolved record index

use std::ops::Range;

use super::error::{Result, TrdError};
use super::variant::FormatVariant;

/// Length of the copyright banner at the start of every container.
pub const COPYRIGHT_LEN: usize = 64;

/// Number of little-endian `u32` words following the banner.
pub const HEADER_WORDS: usize = 16;

/// Total size of banner plus header words.
pub const HEADER_LEN: u64 = (COPYRIGHT_LEN + HEADER_WORDS * 4) as u64;

/// Number of 16-bit offsets stored per index page.
pub const OFFSETS_PER_PAGE: usize = 64;

/// Parsed container header.
///
/// Only the words the decoder relies on are named; the full word array is
/// kept so unknown fields can still be inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Copyright banner, NUL padding removed.
    pub copyright: String,
    /// All sixteen header words in file order.
    pub words: [u32; HEADER_WORDS],
    pub variant: FormatVariant,
    pub entry_count: u32,
    pub index_base_count: u32,
    pub index_offset_count: u32,
    /// Word 8; its meaning is unknown.
    pub reserved: u32,
    pub index_pos: u32,
    pub body_pos: u32,
}

impl ContainerHeader {
    /// Builds a header from the raw banner text and word array.
    pub fn from_words(copyright: String, words: [u32; HEADER_WORDS]) -> Self {
        Self {
            copyright,
            variant: FormatVariant::from_code(words[3]),
            entry_count: words[4],
            index_base_count: words[6],
            index_offset_count: words[7],
            reserved: words[8],
            index_pos: words[9],
            body_pos: words[10],
            words,
        }
    }
}

/// Absolute byte offsets of every record, plus the end-of-body sentinel.
///
/// Record `n` spans `[offsets[n], offsets[n + 1])`; the last resolved offset
/// is closed by `end`. Offsets may repeat (empty records) and are not
/// guaranteed to be strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIndex {
    offsets: Vec<u64>,
    end: u64,
}

impl RecordIndex {
    pub fn new(offsets: Vec<u64>, end: u64) -> Self {
        Self { offsets, end }
    }

    /// Number of resolved offsets (`index_offset_count`).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// The sentinel closing the last record (the container length).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the byte range of record `n`, or `None` if `n` has no offset.
    ///
    /// # Errors
    /// `IndexCorrupt` if the closing offset lies before the opening one.
    pub fn span(&self, n: usize) -> Result<Option<Range<u64>>> {
        let Some(&start) = self.offsets.get(n) else {
            return Ok(None);
        };
        let end = self.offsets.get(n + 1).copied().unwrap_or(self.end);
        if end < start {
            return Err(TrdError::IndexCorrupt(format!(
                "record {} ends at {:#x} before it starts at {:#x}",
                n, end, start
            )));
        }
        Ok(Some(start..end))
    }
}
