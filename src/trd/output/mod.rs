//! Text output of decoded records.
//!
//! Each record becomes one `headword<TAB>definition` line. The three
//! [`MarkupStyle`]s differ only in the prefix/suffix pairs wrapped around each
//! field and in how inline format tags are rewritten.

pub mod markup;

use std::fmt;

use crate::trd::types::entry::DecodeOutcome;

pub use markup::{render, TagSet};

/// Markup applied around decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MarkupStyle {
    /// Plain text with inline punctuation.
    #[value(name = "none", alias = "0")]
    None,
    /// Plain text broken into lines with literal `\n` escapes.
    #[value(name = "escaped", alias = "1")]
    Escaped,
    /// Pango-style `<span>` markup with literal `\n` escapes.
    #[default]
    #[value(name = "markup", alias = "2")]
    Markup,
}

impl MarkupStyle {
    pub fn tags(self) -> &'static TagSet {
        match self {
            MarkupStyle::None => &markup::NONE_TAGS,
            MarkupStyle::Escaped => &markup::ESCAPED_TAGS,
            MarkupStyle::Markup => &markup::MARKUP_TAGS,
        }
    }
}

impl fmt::Display for MarkupStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkupStyle::None => "none",
            MarkupStyle::Escaped => "escaped",
            MarkupStyle::Markup => "markup",
        };
        f.write_str(name)
    }
}

/// Renders one decoded record as a newline-terminated output line.
pub fn format_line(outcome: &DecodeOutcome, style: MarkupStyle) -> String {
    let mut line = render(&outcome.record, style);
    line.push('\n');
    line
}
