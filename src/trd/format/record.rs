//! # Record Decoding
//!
//! A record is a linear byte stream:
//!
//! ```text
//! [item count: u8] [main flag: u8]
//! [headword block]      if main flag & 0x01
//! [header data block]   if main flag & 0x02
//! [sound reference]     if main flag & 0x80
//! [data item] x item count
//! [zero padding]
//! ```
//!
//! Each block starts with its own flag byte whose bits gate the fields that
//! follow (see [`fields`](super::fields)). Strings are 6-bit packed and
//! NUL-terminated. The only integrity check the format offers is that the
//! padding left after the last item decodes to zeros.

use log::{debug, trace, warn};

use crate::trd::codec::packed::PackedCharacterDecoder;
use crate::trd::codec::tables::SymbolTables;
use crate::trd::format::fields::{
    gated, phrase_block_skip, unknown_bits, DataBlock, Gate, HeadwordField, HeaderDataField,
    MainBlock, PhraseGroup, SampleField, SubField, DATA_BLOCKS, HEADER_DATA_FIELDS,
    HEADWORD_FIELDS, MAIN_BLOCKS, NOTE_EXTRA, PHRASE_BLOCK_SIGNATURES, PHRASE_COMMENT,
    PHRASE_GROUPS, SAMPLE_FIELDS, SOUND_EXTENDED, SUB_FIELDS,
};
use crate::trd::types::entry::{
    Anomaly, DataItem, DecodeOutcome, DecodedRecord, HeaderData, Headword, Note, Phrase,
    PhrasePair, Sample, SoundRef, SubBlock,
};
use crate::trd::types::error::{Result, TrdError};
use crate::trd::types::variant::FormatVariant;

/// Decodes single records of one container.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'t> {
    chars: PackedCharacterDecoder<'t>,
}

impl RecordDecoder<'static> {
    pub fn for_variant(variant: FormatVariant) -> Self {
        Self::new(variant.tables())
    }
}

impl<'t> RecordDecoder<'t> {
    pub fn new(tables: &'t SymbolTables) -> Self {
        Self {
            chars: PackedCharacterDecoder::new(tables),
        }
    }

    /// Decodes one record's byte span.
    ///
    /// # Errors
    /// - `RecordTruncated` if a byte field lies past the end of the span.
    /// - `FieldOutOfRange` if a word-class byte is outside the table.
    ///
    /// Non-zero padding, unknown phrase-block signatures and unresolved
    /// marker sequences are returned as anomalies on the outcome instead.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodeOutcome> {
        let mut cur = RecordCursor::new(bytes, self.chars);

        let item_count = cur.byte("item count")?;
        let main_flag = cur.byte("main flag")?;
        trace!("Record: {} items, main flag {:#04x}", item_count, main_flag);
        report_unknown("main flag", main_flag, MAIN_BLOCKS);

        let mut record = DecodedRecord {
            item_count,
            main_flag,
            ..Default::default()
        };

        for block in gated(main_flag, MAIN_BLOCKS) {
            match block.field {
                MainBlock::Headword => record.headword = Some(self.headword(&mut cur)?),
                MainBlock::HeaderData => record.header_data = Some(self.header_data(&mut cur)?),
                MainBlock::Sound => record.sound = Some(self.sound(&mut cur)?),
            }
        }

        let mut list = ItemList::default();
        for i in 0..item_count as usize {
            let item = self.item(&mut cur, i, &mut list)?;
            record.items.push(item);
        }

        cur.check_padding();
        debug!(
            "Decoded record {:?}: {} items, {} bytes, {} anomalies",
            record.headword_text(),
            record.items.len(),
            bytes.len(),
            cur.anomalies.len()
        );

        Ok(DecodeOutcome {
            record,
            anomalies: cur.anomalies,
        })
    }

    fn headword(&self, cur: &mut RecordCursor<'_, 't>) -> Result<Headword> {
        let flag = cur.byte("header flag")?;
        report_unknown("header flag", flag, HEADWORD_FIELDS);

        let mut hw = Headword::default();
        for g in gated(flag, HEADWORD_FIELDS) {
            match g.field {
                HeadwordField::Name => hw.name = Some(cur.string(g.name).replace('_', "")),
                HeadwordField::Variant => hw.variant = Some(cur.string(g.name)),
                HeadwordField::WordClass => {
                    let code = cur.byte(g.name)?;
                    hw.word_class = Some(cur.word_class(g.name, code)?);
                }
                HeadwordField::Parts => hw.parts = Some(cur.string(g.name)),
                HeadwordField::Forms => hw.forms = Some(cur.string(g.name)),
                HeadwordField::OriginNote => hw.origin_note = Some(cur.string(g.name)),
                HeadwordField::Pronunciation => hw.pronunciation = Some(cur.pronunciation(g.name)),
            }
        }
        Ok(hw)
    }

    fn header_data(&self, cur: &mut RecordCursor<'_, 't>) -> Result<HeaderData> {
        let flag = cur.byte("header data flag")?;
        report_unknown("header data flag", flag, HEADER_DATA_FIELDS);

        let mut data = HeaderData::default();
        for g in gated(flag, HEADER_DATA_FIELDS) {
            let text = Some(cur.string(g.name));
            match g.field {
                HeaderDataField::Source => data.source = text,
                HeaderDataField::DataVariant => data.data_variant = text,
                HeaderDataField::Example => data.example = text,
                HeaderDataField::PluralVariant => data.plural_variant = text,
            }
        }
        Ok(data)
    }

    fn sound(&self, cur: &mut RecordCursor<'_, 't>) -> Result<SoundRef> {
        let reference = cur.array::<4>("sound reference")?;
        let control = cur.byte("sound control")?;
        let extended = if control & SOUND_EXTENDED != 0 {
            Some(cur.array::<4>("extended sound reference")?)
        } else {
            None
        };
        Ok(SoundRef {
            reference,
            control,
            extended,
        })
    }

    fn item(&self, cur: &mut RecordCursor<'_, 't>, index: usize, list: &mut ItemList) -> Result<DataItem> {
        let flag = cur.byte("data flag")?;
        trace!("Item {}: data flag {:#04x} at byte {}", index, flag, cur.pos - 1);

        let mut item = DataItem {
            flag,
            ..Default::default()
        };
        let mut numbered = false;

        for block in gated(flag, DATA_BLOCKS) {
            match block.field {
                DataBlock::Sample => item.sample = Some(self.sample(cur, list)?),
                DataBlock::Sub => {
                    let sub = self.sub(cur)?;
                    if sub.numbered {
                        list.ordinal += 1;
                        numbered = true;
                    }
                    item.sub = Some(sub);
                }
                DataBlock::Chart => item.chart = true,
                DataBlock::Definition => item.definition = Some(cur.string(block.name)),
                DataBlock::Note => item.note = Some(self.note(cur)?),
                DataBlock::Phrases => item.phrases = self.phrases(cur)?,
                DataBlock::Reference => item.reference = true,
                DataBlock::PhraseBlock => {
                    let signature = cur.array::<8>(block.name)?;
                    match phrase_block_skip(&signature) {
                        Some(skip) => {
                            let phrase = cur.string("phrase block phrase");
                            cur.skip(skip, "phrase block gap")?;
                            let translation = cur.string("phrase block translation");
                            item.phrase_block = Some(PhrasePair { phrase, translation });
                            list.ordinal = 1;
                            numbered = true;
                        }
                        None => {
                            warn!(
                                "Unknown phrase block signature {:02X?} in item {} (known: {})",
                                signature,
                                index,
                                PHRASE_BLOCK_SIGNATURES.len()
                            );
                            cur.anomalies.push(Anomaly::UnknownSignature {
                                item: index,
                                signature,
                            });
                        }
                    }
                }
            }
        }

        item.ordinal = numbered.then_some(list.ordinal);
        Ok(item)
    }

    fn sample(&self, cur: &mut RecordCursor<'_, 't>, list: &mut ItemList) -> Result<Sample> {
        let flag = cur.byte("sample flag")?;
        report_unknown("sample flag", flag, SAMPLE_FIELDS);

        let mut sample = Sample::default();
        for g in gated(flag, SAMPLE_FIELDS) {
            match g.field {
                SampleField::Text => sample.text = Some(cur.string(g.name)),
                SampleField::Variant => sample.variant = Some(cur.string(g.name)),
                SampleField::WordClass => {
                    let code = cur.byte(g.name)?;
                    if code != list.last_word_class {
                        sample.word_class = Some(cur.word_class(g.name, code)?);
                    }
                    list.last_word_class = code;
                }
                SampleField::WordClassNote => sample.word_class_note = Some(cur.string(g.name)),
                SampleField::Reserved => sample.reserved = Some(cur.array::<3>(g.name)?),
                SampleField::OriginNote => sample.origin_note = Some(cur.string(g.name)),
                SampleField::Pronunciation => sample.pronunciation = Some(cur.pronunciation(g.name)),
            }
        }
        Ok(sample)
    }

    fn sub(&self, cur: &mut RecordCursor<'_, 't>) -> Result<SubBlock> {
        let flag = cur.byte("sub flag")?;
        report_unknown("sub flag", flag, SUB_FIELDS);

        let mut sub = SubBlock::default();
        for g in gated(flag, SUB_FIELDS) {
            match g.field {
                SubField::Example => sub.example = Some(cur.string(g.name)),
                SubField::Prefix => {
                    let prefix = cur.string(g.name);
                    trace!("Discarding sub prefix {:?}", prefix);
                    sub.numbered = true;
                }
            }
        }
        Ok(sub)
    }

    fn note(&self, cur: &mut RecordCursor<'_, 't>) -> Result<Note> {
        let flag = cur.byte("note flag")?;
        let extra = if flag & NOTE_EXTRA != 0 {
            Some(cur.byte("note extra")?)
        } else {
            None
        };
        let text = cur.string("note");
        Ok(Note { flag, extra, text })
    }

    fn phrases(&self, cur: &mut RecordCursor<'_, 't>) -> Result<Vec<Phrase>> {
        let flag = cur.byte("phrase flag")?;
        report_unknown("phrase flag", flag, PHRASE_GROUPS);

        let mut phrases = Vec::new();
        for g in gated(flag, PHRASE_GROUPS) {
            match g.field {
                PhraseGroup::Short => phrases.push(Phrase::Short(cur.string(g.name))),
                PhraseGroup::Pairs | PhraseGroup::GreenPairs => {
                    let count = cur.byte("phrase count")?;
                    for _ in 0..count {
                        let prefix = cur.byte("phrase prefix")?;
                        let comment = (prefix & PHRASE_COMMENT != 0).then(|| cur.string("phrase comment"));
                        let phrase = cur.string("phrase");
                        let translation = cur.string("phrase translation");
                        phrases.push(if g.field == PhraseGroup::Pairs {
                            Phrase::Pair {
                                comment,
                                phrase,
                                translation,
                            }
                        } else {
                            Phrase::Green {
                                comment,
                                phrase,
                                translation,
                            }
                        });
                    }
                }
                PhraseGroup::Simple => {
                    let count = cur.byte("simple phrase count")?;
                    for _ in 0..count {
                        phrases.push(Phrase::Simple(cur.string(g.name)));
                    }
                }
            }
        }
        Ok(phrases)
    }
}

/// State carried across the items of one record.
#[derive(Debug, Default)]
struct ItemList {
    /// Word class of the previous sample; a repeat is not emitted again.
    last_word_class: u8,
    /// Current position in the record's numbered list.
    ordinal: u32,
}

/// Logs flag bits the decoder does not understand. They consume no bytes.
fn report_unknown<F>(flag_name: &str, flag: u8, table: &[Gate<F>]) {
    let unknown = unknown_bits(flag, table);
    if unknown != 0 {
        debug!("{} {:#04x} has unknown bits {:#04x}", flag_name, flag, unknown);
    }
}

/// Forward-only cursor over one record's bytes.
struct RecordCursor<'a, 't> {
    bytes: &'a [u8],
    pos: usize,
    chars: PackedCharacterDecoder<'t>,
    anomalies: Vec<Anomaly>,
}

impl<'a, 't> RecordCursor<'a, 't> {
    fn new(bytes: &'a [u8], chars: PackedCharacterDecoder<'t>) -> Self {
        Self {
            bytes,
            pos: 0,
            chars,
            anomalies: Vec::new(),
        }
    }

    fn byte(&mut self, field: &'static str) -> Result<u8> {
        let b = *self.bytes.get(self.pos).ok_or(TrdError::RecordTruncated {
            offset: self.pos,
            field,
            needed: 1,
        })?;
        self.pos += 1;
        Ok(b)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        let src = self.take(N, field)?;
        out.copy_from_slice(src);
        Ok(out)
    }

    fn skip(&mut self, n: usize, field: &'static str) -> Result<()> {
        self.take(n, field).map(|_| ())
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        let rest = self.bytes.len() - self.pos;
        if rest < n {
            return Err(TrdError::RecordTruncated {
                offset: self.pos,
                field,
                needed: n - rest,
            });
        }
        let bytes = self.bytes;
        let src = &bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(src)
    }

    /// Reads a packed string with backticks removed.
    ///
    /// At the end of the record this yields an empty string and consumes
    /// nothing.
    fn string(&mut self, field: &'static str) -> String {
        let decoded = self.chars.decode(&self.bytes[self.pos..], true);
        trace!("{:03} {}: {:?}", self.pos, field, decoded.text);
        self.pos += decoded.consumed;
        self.note_unresolved(field, decoded.unresolved);
        decoded.text.replace('`', "")
    }

    fn pronunciation(&mut self, field: &'static str) -> String {
        let text = self.string(field);
        let (ipa, unresolved) = self.chars.render_pronunciation(&text);
        self.note_unresolved(field, unresolved);
        ipa
    }

    fn word_class(&self, field: &'static str, code: u8) -> Result<String> {
        let tables = self.chars.tables();
        tables.word_class(code).ok_or(TrdError::FieldOutOfRange {
            field,
            value: code,
            limit: tables.word_classes.len(),
        })
    }

    fn note_unresolved(&mut self, field: &'static str, placeholders: Vec<String>) {
        for placeholder in placeholders {
            trace!("Unresolved {} in {}", placeholder, field);
            self.anomalies.push(Anomaly::UnresolvedComposition { field, placeholder });
        }
    }

    /// Everything after the last item must be zero.
    fn check_padding(&mut self) {
        let padding = &self.bytes[self.pos..];
        let nonzero = padding.iter().filter(|&&b| b != 0).count();
        if nonzero > 0 {
            warn!(
                "{} non-zero padding byte(s) in {} trailing bytes after offset {}",
                nonzero,
                padding.len(),
                self.pos
            );
            self.anomalies.push(Anomaly::TrailingPaddingNonZero {
                offset: self.pos,
                nonzero,
            });
        }
        self.pos = self.bytes.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Packs symbol codes 4-per-3-bytes with a NUL terminator, keeping only
    /// the bytes the terminator reaches into.
    fn packed(codes: &[u8]) -> Vec<u8> {
        let len = codes.len() / 4 * 3 + (codes.len() % 4 + 1).min(3);
        let mut codes = codes.to_vec();
        codes.push(0);
        let mut out = Vec::new();
        for chunk in codes.chunks(4) {
            let c = |i: usize| chunk.get(i).copied().unwrap_or(0);
            out.push(c(0) << 2 | c(1) >> 4);
            out.push((c(1) & 0x0F) << 4 | c(2) >> 2);
            out.push((c(2) & 0x03) << 6 | c(3));
        }
        out.truncate(len);
        out
    }

    /// Lowercase ASCII and spaces as standard alphabet codes.
    fn word(s: &str) -> Vec<u8> {
        packed(
            &s.bytes()
                .map(|b| if b == b' ' { 32 } else { b - b'a' + 1 })
                .collect::<Vec<_>>(),
        )
    }

    fn decode(bytes: &[u8]) -> Result<DecodeOutcome> {
        RecordDecoder::for_variant(FormatVariant::Standard).decode(bytes)
    }

    #[test]
    fn headword_only_record() {
        let mut bytes = vec![0, 0x01, 0x01];
        bytes.extend(word("cat"));
        bytes.extend([0, 0]);

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed());
        assert_eq!(outcome.record.headword_text(), "cat");
        assert!(outcome.record.items.is_empty());
    }

    #[test]
    fn header_word_class_is_validated() {
        let bytes = [0, 0x01, 0x04, 10];
        let outcome = decode(&bytes).unwrap();
        let hw = outcome.record.headword.unwrap();
        assert_eq!(hw.word_class.as_deref(), Some("intr:"));

        let err = decode(&[0, 0x01, 0x04, 31]).unwrap_err();
        assert!(matches!(
            err,
            TrdError::FieldOutOfRange { value: 31, limit: 31, .. }
        ));
    }

    #[test]
    fn nonzero_padding_keeps_decoded_fields() {
        let mut bytes = vec![0, 0x01, 0x01];
        bytes.extend(word("dog"));
        bytes.extend([0, 0x07]);

        let outcome = decode(&bytes).unwrap();
        assert!(!outcome.is_well_formed());
        assert_eq!(outcome.record.headword_text(), "dog");
        assert!(outcome
            .anomalies
            .iter()
            .any(|a| matches!(a, Anomaly::TrailingPaddingNonZero { nonzero: 1, .. })));
    }

    #[test]
    fn missing_byte_field_is_truncation() {
        let err = decode(&[1, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            TrdError::RecordTruncated { offset: 2, field: "data flag", .. }
        ));
        assert!(err.is_record_scoped());
    }

    #[test]
    fn string_at_end_of_record_is_empty() {
        let outcome = decode(&[0, 0x01, 0x03]).unwrap();
        let hw = outcome.record.headword.unwrap();
        assert_eq!(hw.name.as_deref(), Some(""));
        assert_eq!(hw.variant.as_deref(), Some(""));
    }

    #[test]
    fn strings_drop_backticks() {
        // c a ` t in the small alphabet
        let mut bytes = vec![0, 0x01, 0x01];
        bytes.extend(packed(&[3, 1, 56, 20]));
        let outcome = RecordDecoder::for_variant(FormatVariant::Small)
            .decode(&bytes)
            .unwrap();
        assert_eq!(outcome.record.headword_text(), "cat");
    }

    #[test]
    fn sample_word_class_is_emitted_on_change_only() {
        // three items, each a sample with only a word class: 1, 1, 2
        let bytes = [3, 0x00, 0x01, 0x04, 1, 0x01, 0x04, 1, 0x01, 0x04, 2];
        let outcome = decode(&bytes).unwrap();
        let classes: Vec<_> = outcome
            .record
            .items
            .iter()
            .map(|i| i.sample.as_ref().and_then(|s| s.word_class.clone()))
            .collect();
        assert_eq!(classes, vec![Some("n:".into()), None, Some("adj:".into())]);
    }

    #[test]
    fn sub_prefixes_number_items() {
        let mut bytes = vec![3, 0x00];
        for _ in 0..2 {
            bytes.extend([0x02, 0x80]);
            bytes.extend(word("x"));
        }
        bytes.push(0x08);
        bytes.extend(word("plain"));

        let outcome = decode(&bytes).unwrap();
        let ordinals: Vec<_> = outcome.record.items.iter().map(|i| i.ordinal).collect();
        assert_eq!(ordinals, vec![Some(1), Some(2), None]);
        assert_eq!(outcome.record.items[2].definition.as_deref(), Some("plain"));
    }

    #[test]
    fn phrase_pairs_with_and_without_comment() {
        let mut bytes = vec![1, 0x00, 0x20, 0x02, 2];
        bytes.push(0x04);
        bytes.extend(word("lit"));
        bytes.extend(word("go on"));
        bytes.extend(word("dal"));
        bytes.push(0x00);
        bytes.extend(word("go"));
        bytes.extend(word("jit"));

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed());
        assert_eq!(
            outcome.record.items[0].phrases,
            vec![
                Phrase::Pair {
                    comment: Some("lit".into()),
                    phrase: "go on".into(),
                    translation: "dal".into(),
                },
                Phrase::Pair {
                    comment: None,
                    phrase: "go".into(),
                    translation: "jit".into(),
                },
            ]
        );
    }

    #[test]
    fn known_phrase_block_signature_restarts_numbering() {
        let mut bytes = vec![1, 0x00, 0x80];
        bytes.extend(PHRASE_BLOCK_SIGNATURES[1].0);
        bytes.extend(word("ab"));
        bytes.extend([9; 5]);
        bytes.extend(word("cd"));

        let outcome = decode(&bytes).unwrap();
        let item = &outcome.record.items[0];
        assert_eq!(
            item.phrase_block,
            Some(PhrasePair {
                phrase: "ab".into(),
                translation: "cd".into()
            })
        );
        assert_eq!(item.ordinal, Some(1));
        assert!(outcome.is_well_formed());
    }

    #[test]
    fn unknown_phrase_block_signature_is_an_anomaly() {
        let bytes = [1, 0x00, 0x80, 1, 2, 3, 4, 5, 6, 7, 8];
        let outcome = decode(&bytes).unwrap();
        assert_eq!(
            outcome.anomalies,
            vec![Anomaly::UnknownSignature {
                item: 0,
                signature: [1, 2, 3, 4, 5, 6, 7, 8]
            }]
        );
        assert_eq!(outcome.record.items[0].phrase_block, None);
    }

    #[test]
    fn sound_reference_with_extension() {
        let bytes = [0, 0x80, 1, 2, 3, 4, 0x80, 5, 6, 7, 8];
        let outcome = decode(&bytes).unwrap();
        let sound = outcome.record.sound.unwrap();
        assert_eq!(sound.reference, [1, 2, 3, 4]);
        assert_eq!(sound.extended, Some([5, 6, 7, 8]));
        assert!(outcome.is_well_formed());
    }

    #[test]
    fn unresolved_markers_are_collected() {
        // BREVE e
        let mut bytes = vec![0, 0x01, 0x01];
        bytes.extend(packed(&[48, 5]));
        let outcome = decode(&bytes).unwrap();
        assert_eq!(outcome.record.headword_text(), "#BREVE#e");
        assert_eq!(
            outcome.anomalies,
            vec![Anomaly::UnresolvedComposition {
                field: "header name",
                placeholder: "#BREVE#e".into()
            }]
        );
        assert!(outcome.is_well_formed());
    }

    #[test]
    fn note_with_extra_byte() {
        let mut bytes = vec![1, 0x00, 0x10, 0x08, 0x42];
        bytes.extend(word("rare"));
        let note = decode(&bytes).unwrap().record.items[0].note.clone().unwrap();
        assert_eq!(note.extra, Some(0x42));
        assert_eq!(note.text, "rare");
    }

    #[test]
    fn header_data_block_follows_headword() {
        let mut bytes = vec![0, 0x03, 0x01];
        bytes.extend(word("cat"));
        bytes.push(0x4B);
        for text in ["src", "dv", "ex", "pl"] {
            bytes.extend(word(text));
        }

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed(), "{:?}", outcome.anomalies);
        assert_eq!(outcome.record.headword_text(), "cat");
        assert_eq!(
            outcome.record.header_data,
            Some(HeaderData {
                source: Some("src".into()),
                data_variant: Some("dv".into()),
                example: Some("ex".into()),
                plural_variant: Some("pl".into()),
            })
        );
    }

    #[test]
    fn unknown_flag_bits_consume_nothing() {
        // main flag bit 0x04 and header flag bit 0x40 are not understood
        let mut bytes = vec![1, 0x05, 0x41];
        bytes.extend(word("dog"));
        bytes.push(0x08);
        bytes.extend(word("run"));

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed(), "{:?}", outcome.anomalies);
        let hw = outcome.record.headword.clone().unwrap();
        assert_eq!(hw.name.as_deref(), Some("dog"));
        assert_eq!(hw.variant, None);
        assert_eq!(outcome.record.header_data, None);
        assert_eq!(outcome.record.items[0].definition.as_deref(), Some("run"));
    }

    #[test]
    fn sample_reserved_origin_and_pronunciation() {
        let mut bytes = vec![1, 0x00, 0x01, 0xB0, 1, 2, 3];
        bytes.extend(word("orig"));
        bytes.extend(word("ka"));

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed(), "{:?}", outcome.anomalies);
        assert_eq!(
            outcome.record.items[0].sample,
            Some(Sample {
                reserved: Some([1, 2, 3]),
                origin_note: Some("orig".into()),
                pronunciation: Some("ka".into()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn every_phrase_group_in_table_order() {
        let mut bytes = vec![1, 0x00, 0x20, 0x5D];
        bytes.extend(word("s"));
        bytes.extend([1, 0x04]);
        bytes.extend(word("c"));
        bytes.extend(word("gp"));
        bytes.extend(word("gt"));
        bytes.push(2);
        bytes.extend(word("x"));
        bytes.extend(word("y"));
        bytes.extend(word("t"));
        bytes.extend(word("u"));

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed(), "{:?}", outcome.anomalies);
        assert_eq!(
            outcome.record.items[0].phrases,
            vec![
                Phrase::Short("s".into()),
                Phrase::Green {
                    comment: Some("c".into()),
                    phrase: "gp".into(),
                    translation: "gt".into(),
                },
                Phrase::Simple("x".into()),
                Phrase::Simple("y".into()),
                Phrase::Short("t".into()),
                Phrase::Short("u".into()),
            ]
        );
    }

    #[test]
    fn phrase_block_restarts_numbering_between_sub_items() {
        let mut bytes = vec![4, 0x00];
        for _ in 0..2 {
            bytes.extend([0x02, 0x80]);
            bytes.extend(word("x"));
        }
        bytes.push(0x80);
        bytes.extend(PHRASE_BLOCK_SIGNATURES[0].0);
        bytes.extend(word("ab"));
        bytes.extend([0; 4]);
        bytes.extend(word("cd"));
        bytes.extend([0x02, 0x80]);
        bytes.extend(word("x"));

        let outcome = decode(&bytes).unwrap();
        assert!(outcome.is_well_formed(), "{:?}", outcome.anomalies);
        let ordinals: Vec<_> = outcome.record.items.iter().map(|i| i.ordinal).collect();
        assert_eq!(ordinals, vec![Some(1), Some(2), Some(1), Some(2)]);
        assert_eq!(
            outcome.record.items[2].phrase_block,
            Some(PhrasePair {
                phrase: "ab".into(),
                translation: "cd".into()
            })
        );
    }
}
