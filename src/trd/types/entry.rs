//! Structured result of decoding one dictionary record.
//!
//! Every optional field mirrors one flag bit of the on-disk record. A field
//! is `Some` exactly when its bit was set, even if the decoded string is
//! empty, so the markup layer can reproduce the on-disk field layout.

use std::fmt;

/// Header block of a record (gated by `mainFlag & 0x01`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headword {
    /// Record name with `_` removed.
    pub name: Option<String>,
    pub variant: Option<String>,
    /// Word-class label, e.g. `n:` or `intr:`.
    pub word_class: Option<String>,
    pub parts: Option<String>,
    pub forms: Option<String>,
    pub origin_note: Option<String>,
    /// Pronunciation after IPA substitution.
    pub pronunciation: Option<String>,
}

/// Header data block of a record (gated by `mainFlag & 0x02`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderData {
    pub source: Option<String>,
    pub data_variant: Option<String>,
    pub example: Option<String>,
    pub plural_variant: Option<String>,
}

/// Reference into the vendor's sound archive (gated by `mainFlag & 0x80`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundRef {
    pub reference: [u8; 4],
    /// Control byte; its high bit announces `extended`.
    pub control: u8,
    pub extended: Option<[u8; 4]>,
}

/// Sample sub-block of a data item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    pub text: Option<String>,
    pub variant: Option<String>,
    /// Word-class label, present only when it differs from the previous item.
    pub word_class: Option<String>,
    pub word_class_note: Option<String>,
    pub reserved: Option<[u8; 3]>,
    pub origin_note: Option<String>,
    pub pronunciation: Option<String>,
}

/// Sub-example sub-block of a data item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubBlock {
    pub example: Option<String>,
    /// Set when a sub-prefix was present; its text is discarded and the item
    /// joins the record's numbered list instead.
    pub numbered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub flag: u8,
    /// Extra byte read when `flag & 0x08`; meaning unknown.
    pub extra: Option<u8>,
    pub text: String,
}

/// One rendered phrase of a phrase block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrase {
    /// Short form phrase.
    Short(String),
    /// Phrase and translation, optionally preceded by a comment.
    Pair {
        comment: Option<String>,
        phrase: String,
        translation: String,
    },
    /// "Green" phrase pair: same wire layout as `Pair`, rendered differently.
    Green {
        comment: Option<String>,
        phrase: String,
        translation: String,
    },
    /// Simple phrase without translation.
    Simple(String),
}

/// Two-part phrase behind a recognised 8-byte phrase-block signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePair {
    pub phrase: String,
    pub translation: String,
}

/// One data item of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataItem {
    pub flag: u8,
    pub sample: Option<Sample>,
    pub sub: Option<SubBlock>,
    /// Chart bit was set; no bytes are attached to it.
    pub chart: bool,
    pub definition: Option<String>,
    pub note: Option<Note>,
    pub phrases: Vec<Phrase>,
    /// Reference bit was set; no bytes are attached to it.
    pub reference: bool,
    pub phrase_block: Option<PhrasePair>,
    /// Position in the record's numbered list, if the item belongs to one.
    pub ordinal: Option<u32>,
}

/// Fully decoded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    pub item_count: u8,
    pub main_flag: u8,
    pub headword: Option<Headword>,
    pub header_data: Option<HeaderData>,
    pub sound: Option<SoundRef>,
    pub items: Vec<DataItem>,
}

impl DecodedRecord {
    /// The record name, or an empty string for records without a header.
    pub fn headword_text(&self) -> &str {
        self.headword
            .as_ref()
            .and_then(|h| h.name.as_deref())
            .unwrap_or("")
    }
}

/// A recoverable format oddity met while decoding a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A marker symbol had no table entry; `placeholder` was emitted instead.
    UnresolvedComposition {
        field: &'static str,
        placeholder: String,
    },
    /// Bytes after the last structured field were not all zero.
    TrailingPaddingNonZero { offset: usize, nonzero: usize },
    /// An item's phrase-block signature matched neither known constant.
    UnknownSignature { item: usize, signature: [u8; 8] },
}

impl Anomaly {
    /// Structural anomalies mean the cursor most likely derailed.
    pub fn is_structural(&self) -> bool {
        matches!(self, Anomaly::TrailingPaddingNonZero { .. })
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Anomaly::UnresolvedComposition { field, placeholder } => {
                write!(f, "unresolved composition {} in {}", placeholder, field)
            }
            Anomaly::TrailingPaddingNonZero { offset, nonzero } => {
                write!(f, "{} non-zero padding byte(s) after offset {}", nonzero, offset)
            }
            Anomaly::UnknownSignature { item, signature } => {
                write!(f, "unknown phrase block signature {:02X?} in item {}", signature, item)
            }
        }
    }
}

/// A decoded record together with the anomalies met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub record: DecodedRecord,
    pub anomalies: Vec<Anomaly>,
}

impl DecodeOutcome {
    /// `true` if the trailing padding decoded to zeros.
    pub fn is_well_formed(&self) -> bool {
        !self.anomalies.iter().any(Anomaly::is_structural)
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}
