//! Format variants of the .trd container.
//!
//! Lingea shipped at least two layouts that share the record grammar but
//! differ in how the index pages are addressed and which alphabet the packed
//! strings use. The variant is fixed once the header is read.

use std::fmt;

use crate::trd::codec::tables::{SymbolTables, SMALL_TABLES, STANDARD_TABLES};

/// Header word 3 value identifying the small-dictionary layout.
pub const SMALL_VARIANT_CODE: u32 = 2052;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVariant {
    /// 2002-series and pocket dictionaries.
    #[default]
    Standard,
    /// Small dictionaries: one index base covers four offset pages and
    /// strings use the reduced Czech alphabet.
    Small,
}

impl FormatVariant {
    /// Classifies the container from header word 3.
    pub fn from_code(code: u32) -> Self {
        if code == SMALL_VARIANT_CODE {
            FormatVariant::Small
        } else {
            FormatVariant::Standard
        }
    }

    /// Number of consecutive 64-entry offset pages that share one base.
    pub fn pages_per_base(self) -> usize {
        match self {
            FormatVariant::Standard => 1,
            FormatVariant::Small => 4,
        }
    }

    /// The immutable lookup tables used to decode strings of this variant.
    pub fn tables(self) -> &'static SymbolTables {
        match self {
            FormatVariant::Standard => &STANDARD_TABLES,
            FormatVariant::Small => &SMALL_TABLES,
        }
    }
}

impl fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatVariant::Standard => write!(f, "standard"),
            FormatVariant::Small => write!(f, "small"),
        }
    }
}
