//! # lingea-trd
//!
//! A decoder for Lingea `.trd` dictionary containers (Lingea Lexicon 2002 and
//! the small-dictionary series). Records are turned into a structured
//! [`DecodedRecord`] and can be rendered as `headword<TAB>definition` lines in
//! one of three markup styles.
//!
//! ```no_run
//! use lingea_trd::{format_line, MarkupStyle, TrdReader};
//!
//! let reader = TrdReader::open("dict.trd")?;
//! for (_, result) in reader.iter_records() {
//!     print!("{}", format_line(&result?, MarkupStyle::None));
//! }
//! # Ok::<(), lingea_trd::TrdError>(())
//! ```
pub mod trd;

// Re-export the main types for convenience
pub use trd::{
    format::record::RecordDecoder,
    iter::{DecodeSummary, RecordIterator, SpanIterator},
    output::{format_line, MarkupStyle},
    reader::TrdReader,
    types::{
        entry::{Anomaly, DataItem, DecodeOutcome, DecodedRecord, Headword, Phrase},
        error::{Result, TrdError},
        models::{ContainerHeader, RecordIndex},
        variant::FormatVariant,
    },
};
