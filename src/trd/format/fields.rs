//! Flag-bit layout of a record.
//!
//! Every optional block of a record is announced by a flag byte whose bits
//! gate one field each. The tables below list, per flag byte, the bits the
//! decoder understands in the order their fields appear on disk. The record
//! decoder walks a table with [`gated`] and dispatches on the field tag, so a
//! newly understood bit is one table row plus one match arm.

/// One understood bit of a flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate<F> {
    pub bit: u8,
    pub field: F,
    /// Field name used in errors, anomalies and trace output.
    pub name: &'static str,
}

const fn gate<F>(bit: u8, field: F, name: &'static str) -> Gate<F> {
    Gate { bit, field, name }
}

/// Blocks announced by the main flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainBlock {
    Headword,
    HeaderData,
    Sound,
}

pub static MAIN_BLOCKS: &[Gate<MainBlock>] = &[
    gate(0x01, MainBlock::Headword, "headword"),
    gate(0x02, MainBlock::HeaderData, "header data"),
    gate(0x80, MainBlock::Sound, "sound reference"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadwordField {
    Name,
    Variant,
    WordClass,
    Parts,
    Forms,
    OriginNote,
    Pronunciation,
}

pub static HEADWORD_FIELDS: &[Gate<HeadwordField>] = &[
    gate(0x01, HeadwordField::Name, "header name"),
    gate(0x02, HeadwordField::Variant, "header variant"),
    gate(0x04, HeadwordField::WordClass, "header word class"),
    gate(0x08, HeadwordField::Parts, "header parts"),
    gate(0x10, HeadwordField::Forms, "header forms"),
    gate(0x20, HeadwordField::OriginNote, "header origin note"),
    gate(0x80, HeadwordField::Pronunciation, "header pronunciation"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDataField {
    Source,
    DataVariant,
    Example,
    PluralVariant,
}

pub static HEADER_DATA_FIELDS: &[Gate<HeaderDataField>] = &[
    gate(0x01, HeaderDataField::Source, "header source"),
    gate(0x02, HeaderDataField::DataVariant, "header data variant"),
    gate(0x08, HeaderDataField::Example, "header example"),
    gate(0x40, HeaderDataField::PluralVariant, "header plural variant"),
];

/// Sub-blocks announced by an item's data flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBlock {
    Sample,
    Sub,
    Chart,
    Definition,
    Note,
    Phrases,
    Reference,
    PhraseBlock,
}

pub static DATA_BLOCKS: &[Gate<DataBlock>] = &[
    gate(0x01, DataBlock::Sample, "sample"),
    gate(0x02, DataBlock::Sub, "sub block"),
    gate(0x04, DataBlock::Chart, "chart"),
    gate(0x08, DataBlock::Definition, "definition"),
    gate(0x10, DataBlock::Note, "note"),
    gate(0x20, DataBlock::Phrases, "phrases"),
    gate(0x40, DataBlock::Reference, "reference"),
    gate(0x80, DataBlock::PhraseBlock, "phrase block"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    Text,
    Variant,
    WordClass,
    WordClassNote,
    Reserved,
    OriginNote,
    Pronunciation,
}

pub static SAMPLE_FIELDS: &[Gate<SampleField>] = &[
    gate(0x01, SampleField::Text, "sample"),
    gate(0x02, SampleField::Variant, "sample variant"),
    gate(0x04, SampleField::WordClass, "sample word class"),
    gate(0x08, SampleField::WordClassNote, "sample word class note"),
    gate(0x10, SampleField::Reserved, "sample reserved bytes"),
    gate(0x20, SampleField::OriginNote, "sample origin note"),
    gate(0x80, SampleField::Pronunciation, "sample pronunciation"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubField {
    Example,
    Prefix,
}

pub static SUB_FIELDS: &[Gate<SubField>] = &[
    gate(0x08, SubField::Example, "sub example"),
    gate(0x80, SubField::Prefix, "sub prefix"),
];

/// Phrase groups announced by the first phrase flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseGroup {
    Short,
    Pairs,
    GreenPairs,
    Simple,
}

pub static PHRASE_GROUPS: &[Gate<PhraseGroup>] = &[
    gate(0x01, PhraseGroup::Short, "short phrase"),
    gate(0x02, PhraseGroup::Pairs, "phrase pairs"),
    gate(0x04, PhraseGroup::GreenPairs, "green phrase pairs"),
    gate(0x08, PhraseGroup::Simple, "simple phrases"),
    gate(0x10, PhraseGroup::Short, "short phrase"),
    gate(0x40, PhraseGroup::Short, "short phrase"),
];

/// Prefix bit of a phrase pair announcing a comment string.
pub const PHRASE_COMMENT: u8 = 0x04;

/// Note flag bit announcing one extra byte before the note text.
pub const NOTE_EXTRA: u8 = 0x08;

/// Sound control bit announcing the extended 4-byte reference.
pub const SOUND_EXTENDED: u8 = 0x80;

/// Known 8-byte phrase-block signatures and the bytes skipped between the
/// phrase and its translation.
pub static PHRASE_BLOCK_SIGNATURES: &[([u8; 8], usize)] = &[
    ([0x80, 0x80, 0xF9, 0xDF, 0x9D, 0x00, 0x0B, 0x01], 4),
    ([0x80, 0x80, 0xF9, 0xDF, 0x9D, 0x00, 0x23, 0x01], 5),
];

/// Gates of `table` whose bit is set in `flag`, in table order.
pub fn gated<F: Copy>(flag: u8, table: &'static [Gate<F>]) -> impl Iterator<Item = Gate<F>> {
    table.iter().copied().filter(move |g| flag & g.bit != 0)
}

/// Bits of `flag` that no gate of `table` claims.
pub fn unknown_bits<F>(flag: u8, table: &[Gate<F>]) -> u8 {
    let known = table.iter().fold(0u8, |mask, g| mask | g.bit);
    flag & !known
}

/// Bytes skipped inside a phrase block with `signature`, if it is known.
pub fn phrase_block_skip(signature: &[u8; 8]) -> Option<usize> {
    PHRASE_BLOCK_SIGNATURES
        .iter()
        .find(|(known, _)| known == signature)
        .map(|&(_, skip)| skip)
}
