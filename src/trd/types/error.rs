//! Custom error types for the lingea-trd crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Variants fall into two scopes:
/// - container scope (`Io`, `HeaderTooShort`, `IndexCorrupt`) aborts a load;
/// - record scope (`FieldOutOfRange`, `RecordTruncated`, `RecordOutOfRange`)
///   aborts only the record being decoded.
///
/// Recoverable format oddities are not errors at all; see
/// [`Anomaly`](crate::trd::types::entry::Anomaly).
#[derive(Debug, Error)]
pub enum TrdError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The file is shorter than the fixed copyright block plus header words.
    #[error("Container header truncated: expected {expected} bytes, found {found}")]
    HeaderTooShort { expected: u64, found: u64 },

    /// Header counts and offsets are inconsistent with the file length.
    #[error("Index corrupt: {0}")]
    IndexCorrupt(String),

    /// A byte that indexes a fixed table is outside the table.
    #[error("{field} value {value} is out of range (table holds {limit} entries)")]
    FieldOutOfRange {
        field: &'static str,
        value: u8,
        limit: usize,
    },

    /// The record ended while a fixed-width field was still expected.
    #[error("Record truncated at byte {offset}: {field} needs {needed} more byte(s)")]
    RecordTruncated {
        offset: usize,
        field: &'static str,
        needed: usize,
    },

    /// A record number outside `[0, entry_count)` was requested for decoding.
    #[error("Record {index} is out of range (entry count {count})")]
    RecordOutOfRange { index: usize, count: usize },

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

impl TrdError {
    /// Returns `true` if the error only invalidates a single record.
    ///
    /// Callers iterating a whole dictionary use this to decide between
    /// logging and moving on, or aborting the run.
    pub fn is_record_scoped(&self) -> bool {
        matches!(
            self,
            TrdError::FieldOutOfRange { .. }
                | TrdError::RecordTruncated { .. }
                | TrdError::RecordOutOfRange { .. }
        )
    }
}

/// A convenience `Result` type alias using the crate's `TrdError` type.
pub type Result<T> = std::result::Result<T, TrdError>;
