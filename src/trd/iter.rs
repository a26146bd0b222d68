//! Iterators for sequential access to `.trd` records.
//!
//! Two layers, each adding work on top of the previous one:
//!
//! 1. [`SpanIterator`] - `(n, byte range)` of every record, from the index alone
//! 2. [`RecordIterator`] - `(n, DecodeOutcome)`, reading and decoding each span
//!
//! [`DecodeSummary`] folds the results of a run into pass/fail counts.
//!
//! # Example
//! ```no_run
//! # use lingea_trd::{TrdReader, DecodeSummary};
//! # let reader = TrdReader::open("dict.trd").unwrap();
//! let mut summary = DecodeSummary::default();
//! for (n, result) in reader.iter_records() {
//!     summary.add(&result);
//!     if let Ok(outcome) = result {
//!         println!("{}: {}", n, outcome.record.headword_text());
//!     }
//! }
//! println!("{}", summary);
//! ```

use std::fmt;
use std::io::{Read, Seek};
use std::ops::Range;

use log::warn;

use super::format::record::RecordDecoder;
use super::reader::TrdReader;
use super::types::entry::{Anomaly, DecodeOutcome};
use super::types::error::{Result, TrdError};

/// Iterator over the byte ranges of all records.
///
/// Created by [`TrdReader::iter_spans()`](crate::TrdReader::iter_spans).
pub struct SpanIterator<'a, R> {
    reader: &'a TrdReader<R>,
    next: usize,
    skip_first: bool,
}

impl<'a, R: Read + Seek> SpanIterator<'a, R> {
    pub(super) fn new(reader: &'a TrdReader<R>) -> Self {
        Self {
            reader,
            next: 0,
            skip_first: false,
        }
    }

    /// Skips record 0, which some containers use for front matter.
    pub fn skip_first(mut self) -> Self {
        self.skip_first = true;
        self
    }

    /// Transforms this iterator to read and decode each record.
    pub fn with_records(self) -> RecordIterator<'a, R> {
        RecordIterator {
            decoder: self.reader.decoder(),
            reader: self.reader,
            spans: self,
        }
    }
}

impl<'a, R: Read + Seek> Iterator for SpanIterator<'a, R> {
    type Item = (usize, Result<Range<u64>>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_first && self.next == 0 {
            self.next = 1;
        }
        let n = self.next;
        if n >= self.reader.num_entries() {
            return None;
        }
        self.next += 1;

        let span = self.reader.index().span(n).and_then(|span| {
            span.ok_or_else(|| {
                TrdError::IndexCorrupt(format!("record {} has no index offset", n))
            })
        });
        Some((n, span))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let start = if self.skip_first { self.next.max(1) } else { self.next };
        let left = self.reader.num_entries().saturating_sub(start);
        (left, Some(left))
    }
}

/// Iterator over decoded records.
///
/// Record-scoped failures are yielded as `Err` next to the record number and
/// iteration continues with the following record.
///
/// Created by [`SpanIterator::with_records()`].
pub struct RecordIterator<'a, R> {
    spans: SpanIterator<'a, R>,
    reader: &'a TrdReader<R>,
    decoder: RecordDecoder<'static>,
}

impl<'a, R: Read + Seek> RecordIterator<'a, R> {
    /// Skips record 0, which some containers use for front matter.
    pub fn skip_first(mut self) -> Self {
        self.spans.skip_first = true;
        self
    }
}

impl<'a, R: Read + Seek> Iterator for RecordIterator<'a, R> {
    type Item = (usize, Result<DecodeOutcome>);

    fn next(&mut self) -> Option<Self::Item> {
        let (n, span) = self.spans.next()?;
        let result = span
            .and_then(|_| self.reader.read_record(n))
            .and_then(|bytes| self.decoder.decode(&bytes));

        if let Err(e) = &result {
            warn!("Record {} failed to decode: {}", n, e);
        }
        Some((n, result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spans.size_hint()
    }
}

/// Pass/fail tally of a decoding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Records attempted.
    pub records: usize,
    /// Records decoded with all-zero padding.
    pub well_formed: usize,
    /// Records decoded but with non-zero padding.
    pub anomalous: usize,
    /// Records that failed with a record-scoped error.
    pub failed: usize,
    /// Container-level errors met during the run.
    pub fatal: usize,
    pub unresolved_compositions: usize,
    pub unknown_signatures: usize,
}

impl DecodeSummary {
    /// Adds one record result to the tally.
    pub fn add(&mut self, result: &Result<DecodeOutcome>) {
        self.records += 1;
        match result {
            Ok(outcome) => {
                if outcome.is_well_formed() {
                    self.well_formed += 1;
                } else {
                    self.anomalous += 1;
                }
                for anomaly in &outcome.anomalies {
                    match anomaly {
                        Anomaly::UnresolvedComposition { .. } => self.unresolved_compositions += 1,
                        Anomaly::UnknownSignature { .. } => self.unknown_signatures += 1,
                        Anomaly::TrailingPaddingNonZero { .. } => {}
                    }
                }
            }
            Err(e) if e.is_record_scoped() => self.failed += 1,
            Err(_) => self.fatal += 1,
        }
    }

    /// Total anomalies of every kind, padding included.
    pub fn anomaly_count(&self) -> usize {
        self.anomalous + self.unresolved_compositions + self.unknown_signatures
    }

    /// `true` if every record decoded with clean padding.
    pub fn all_passed(&self) -> bool {
        self.well_formed == self.records
    }
}

impl<'r> Extend<&'r Result<DecodeOutcome>> for DecodeSummary {
    fn extend<I: IntoIterator<Item = &'r Result<DecodeOutcome>>>(&mut self, iter: I) {
        for result in iter {
            self.add(result);
        }
    }
}

impl fmt::Display for DecodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} passed, {} bad padding, {} failed, {} fatal; \
             {} unresolved compositions, {} unknown signatures",
            self.records,
            self.well_formed,
            self.anomalous,
            self.failed,
            self.fatal,
            self.unresolved_compositions,
            self.unknown_signatures
        )
    }
}
