//! Six-bit packed character decoding.
//!
//! Strings are stored as 6-bit symbol codes, four symbols per three bytes,
//! most significant bits first:
//!
//! ```text
//! byte:    |0 0 0 0 0 0 1 1|1 1 1 1 2 2 2 2|2 2 3 3 3 3 3 3|
//! symbol:   \---- 0 ----/\---- 1 ----/\---- 2 ----/\-- 3 --/
//! ```
//!
//! Decoding happens in two passes: [`unpack_symbols`] extracts codes, then the
//! alphabet of the container's [`SymbolTables`] turns codes into text,
//! resolving marker symbols against their sub-tables and composition maps.

use log::trace;

use super::compose;
use super::tables::{Glyph, Marker, SubTable, SymbolTables};

/// First slot of the phonetic table that lines up with `A`.
const PHONETIC_LETTER_BASE: usize = 32;

/// Result of decoding one packed string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedString {
    pub text: String,
    /// Bytes covered by the string, terminator included.
    pub consumed: usize,
    /// Placeholders emitted for marker sequences with no table entry.
    pub unresolved: Vec<String>,
}

/// Extracts 6-bit codes from `bytes`.
///
/// Returns the codes and the number of bytes whose bits were used. With
/// `stop_at_nul`, decoding ends at the first zero code, which is not
/// returned but whose bytes are counted. Never reads past `bytes`.
pub fn unpack_symbols(bytes: &[u8], stop_at_nul: bool) -> (Vec<u8>, usize) {
    let mut symbols = Vec::with_capacity(bytes.len() * 4 / 3 + 1);
    let mut consumed = 0;

    for k in 0.. {
        let base = k / 4 * 3;
        let code = match k % 4 {
            0 => match bytes.get(base) {
                Some(&b0) => b0 >> 2,
                None => break,
            },
            1 => match bytes.get(base + 1) {
                Some(&b1) => (bytes[base] & 0x03) << 4 | b1 >> 4,
                None => break,
            },
            2 => match bytes.get(base + 2) {
                Some(&b2) => (bytes[base + 1] & 0x0F) << 2 | b2 >> 6,
                None => break,
            },
            _ => bytes[base + 2] & 0x3F,
        };
        consumed = base + (k % 4 + 1).min(3);

        if code == 0 && stop_at_nul {
            break;
        }
        symbols.push(code);
    }

    (symbols, consumed)
}

/// Decodes packed strings with one container's tables.
#[derive(Debug, Clone, Copy)]
pub struct PackedCharacterDecoder<'t> {
    tables: &'t SymbolTables,
}

impl<'t> PackedCharacterDecoder<'t> {
    pub fn new(tables: &'t SymbolTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t SymbolTables {
        self.tables
    }

    /// Decodes a packed string from the start of `bytes`.
    ///
    /// An all-zero span decodes to an empty string covering one byte; an
    /// empty span covers none.
    pub fn decode(&self, bytes: &[u8], stop_at_nul: bool) -> PackedString {
        let (symbols, consumed) = unpack_symbols(bytes, stop_at_nul);
        let (text, unresolved) = self.render(&symbols);
        trace!("Packed string: {} symbols, {} bytes -> {:?}", symbols.len(), consumed, text);
        PackedString {
            text,
            consumed,
            unresolved,
        }
    }

    /// Turns symbol codes into text.
    ///
    /// Every marker (and every reserved slot) swallows the symbols it
    /// announces, even when they cannot be resolved. Missing trailing symbols
    /// read as code 0. Output stops at the first NUL character.
    pub fn render(&self, symbols: &[u8]) -> (String, Vec<String>) {
        let mut text = String::new();
        let mut unresolved = Vec::new();
        let follower = |i: usize| self.tables.glyph(symbols.get(i).copied().unwrap_or(0));
        let code_at = |i: usize| symbols.get(i).copied().unwrap_or(0);

        let mut i = 0;
        while i < symbols.len() {
            let glyph = self.tables.glyph(symbols[i]);
            let piece = match glyph {
                Glyph::Literal(s) => {
                    i += 1;
                    Ok(s.to_string())
                }
                Glyph::Reserved(_) => {
                    let placeholder = glyph.to_string();
                    i += 2;
                    Err(placeholder)
                }
                Glyph::Marker(marker) => {
                    let piece = self.resolve(marker, i, &follower, &code_at);
                    i += 1 + marker.arity();
                    piece
                }
            };

            let piece = match piece {
                Ok(resolved) => resolved,
                Err(placeholder) => {
                    let visible = placeholder.split('\0').next().unwrap_or("").to_string();
                    unresolved.push(visible);
                    placeholder
                }
            };
            if let Some(nul) = piece.find('\0') {
                text.push_str(&piece[..nul]);
                break;
            }
            text.push_str(&piece);
        }

        (text, unresolved)
    }

    /// Resolves the marker at `i`; `Err` carries the placeholder text.
    fn resolve(
        &self,
        marker: Marker,
        i: usize,
        follower: &impl Fn(usize) -> Glyph,
        code_at: &impl Fn(usize) -> u8,
    ) -> Result<String, String> {
        let sub_table = |table: &SubTable| {
            let code = code_at(i + 1);
            table
                .get(code)
                .map(str::to_string)
                .ok_or_else(|| table.placeholder(code))
        };

        match marker {
            Marker::Uppercase => sub_table(&self.tables.uppercase),
            Marker::Symbol => sub_table(&self.tables.symbols),
            Marker::Special => sub_table(&self.tables.special),
            Marker::Phonetic => {
                let (first, second) = (follower(i + 1), follower(i + 2));
                compose::phonetic(first, second)
                    .map(str::to_string)
                    .ok_or_else(|| format!("{}{}{}", Glyph::Marker(marker), first, second))
            }
            Marker::Unicode => Err(Glyph::Marker(marker).to_string()),
            _ => {
                let base = follower(i + 1);
                compose::diacritic(marker, base)
                    .map(str::to_string)
                    .ok_or_else(|| format!("{}{}", Glyph::Marker(marker), base))
            }
        }
    }

    /// Replaces uppercase letters of a decoded pronunciation with IPA symbols.
    ///
    /// Letters map through the 64-slot phonetic table by their position in
    /// the standard uppercase table; letters whose slot is empty become the
    /// slot's placeholder. Everything else passes through unchanged.
    pub fn render_pronunciation(&self, text: &str) -> (String, Vec<String>) {
        let table = &self.tables.phonetic_uppercase;
        let mut out = String::with_capacity(text.len());
        let mut unresolved = Vec::new();

        for ch in text.chars() {
            if !ch.is_ascii_uppercase() {
                out.push(ch);
                continue;
            }
            let code = (PHONETIC_LETTER_BASE + (ch as u8 - b'A') as usize) as u8;
            match table.get(code) {
                Some(ipa) => out.push_str(ipa),
                None => {
                    let placeholder = table.placeholder(code);
                    out.push_str(&placeholder);
                    unresolved.push(placeholder);
                }
            }
        }

        (out, unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trd::codec::tables::{SMALL_TABLES, STANDARD_TABLES};

    /// Packs codes four-per-three-bytes, padding the last group with zeros.
    fn pack(codes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in codes.chunks(4) {
            let c = |i: usize| chunk.get(i).copied().unwrap_or(0);
            out.push(c(0) << 2 | c(1) >> 4);
            out.push((c(1) & 0x0F) << 4 | c(2) >> 2);
            out.push((c(2) & 0x03) << 6 | c(3));
        }
        out
    }

    fn standard() -> PackedCharacterDecoder<'static> {
        PackedCharacterDecoder::new(&STANDARD_TABLES)
    }

    #[test]
    fn all_zero_span_is_empty_string_of_one_byte() {
        let decoded = standard().decode(&[0, 0, 0, 0], true);
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.consumed, 1);
    }

    #[test]
    fn empty_span_consumes_nothing() {
        let decoded = standard().decode(&[], true);
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.consumed, 0);
    }

    #[test]
    fn terminated_word_counts_terminator_bytes() {
        // c a t NUL -> exactly one group
        let bytes = pack(&[3, 1, 20, 0]);
        let decoded = standard().decode(&bytes, true);
        assert_eq!(decoded.text, "cat");
        assert_eq!(decoded.consumed, 3);

        // d o g s NUL -> terminator is the first symbol of the second group
        let mut bytes = pack(&[4, 15, 7, 19, 0]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let decoded = standard().decode(&bytes, true);
        assert_eq!(decoded.text, "dogs");
        assert_eq!(decoded.consumed, 4);
    }

    #[test]
    fn unpack_never_reads_past_the_span() {
        let (symbols, consumed) = unpack_symbols(&[0x04, 0x10], true);
        assert_eq!(symbols, vec![1, 1]);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn unterminated_span_is_decoded_whole_without_nul_stop() {
        let bytes = pack(&[1, 2, 3, 4]);
        let decoded = standard().decode(&bytes, false);
        assert_eq!(decoded.text, "abcd");
        assert_eq!(decoded.consumed, 3);
    }

    #[test]
    fn uppercase_marker_indexes_sub_table() {
        // UPCASE 'P' r a h a
        let decoded = standard().render(&[61, 47, 18, 1, 8, 1]);
        assert_eq!(decoded.0, "Praha");
        assert!(decoded.1.is_empty());
    }

    #[test]
    fn diacritics_compose_with_following_symbol() {
        // CARON c ACUTE a
        let (text, unresolved) = standard().render(&[47, 3, 41, 1]);
        assert_eq!(text, "čá");
        assert!(unresolved.is_empty());
    }

    #[test]
    fn unresolved_diacritic_emits_placeholder() {
        // BREVE e
        let (text, unresolved) = standard().render(&[48, 5, 1]);
        assert_eq!(text, "#BREVE#ea");
        assert_eq!(unresolved, vec!["#BREVE#e".to_string()]);
    }

    #[test]
    fn phonetic_marker_consumes_two_symbols() {
        // PRON e l a
        let (text, _) = standard().render(&[60, 5, 12, 1]);
        assert_eq!(text, "ɛa");
    }

    #[test]
    fn reserved_slot_swallows_follower() {
        let (text, unresolved) = standard().render(&[27, 1, 2]);
        assert_eq!(text, "#AL27#b");
        assert_eq!(unresolved, vec!["#AL27#".to_string()]);
    }

    #[test]
    fn marker_at_end_of_string_reads_nul() {
        let (text, unresolved) = standard().render(&[1, 41]);
        assert_eq!(text, "a#ACUTE#");
        assert_eq!(unresolved, vec!["#ACUTE#".to_string()]);
    }

    #[test]
    fn small_alphabet_has_precomposed_letters() {
        let decoder = PackedCharacterDecoder::new(&SMALL_TABLES);
        // č e s k ý
        let (text, _) = decoder.render(&[29, 5, 19, 11, 46]);
        assert_eq!(text, "český");
        // UPCASE Č
        let (text, _) = decoder.render(&[60, 29]);
        assert_eq!(text, "Č");
    }

    #[test]
    fn pronunciation_maps_letters_to_ipa() {
        let (text, unresolved) = standard().render_pronunciation("kAt");
        assert_eq!(text, "kɑt");
        assert!(unresolved.is_empty());

        let (text, unresolved) = standard().render_pronunciation("B");
        assert_eq!(text, "#upr33#");
        assert_eq!(unresolved, vec!["#upr33#".to_string()]);
    }
}
