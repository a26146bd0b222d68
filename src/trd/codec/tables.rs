//! Static lookup tables for packed-character decoding.
//!
//! Every table has 64 slots, one per 6-bit symbol code. Sub-table slots whose
//! character is unknown hold an empty string and render as a stable
//! placeholder (`#UP39#`, `#SY5#`, ...) so decoded output stays reproducible.

use std::fmt;

/// Instruction glyphs found in an alphabet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Grave,
    Acute,
    Circumflex,
    Tilde,
    Umlaut,
    DoubleAcute,
    Caron,
    Breve,
    Cedilla,
    Stroke,
    Sharp,
    Symbol,
    Phonetic,
    Uppercase,
    Special,
    /// Announces a raw code point; the layout was never worked out.
    Unicode,
}

impl Marker {
    pub fn name(self) -> &'static str {
        match self {
            Marker::Grave => "GRAVE",
            Marker::Acute => "ACUTE",
            Marker::Circumflex => "CIRC",
            Marker::Tilde => "TILDE",
            Marker::Umlaut => "UML",
            Marker::DoubleAcute => "DACUT",
            Marker::Caron => "CARON",
            Marker::Breve => "BREVE",
            Marker::Cedilla => "CEDIL",
            Marker::Stroke => "STROKE",
            Marker::Sharp => "SHARP",
            Marker::Symbol => "SYMBOL",
            Marker::Phonetic => "PRON",
            Marker::Uppercase => "UPCASE",
            Marker::Special => "SPECIAL",
            Marker::Unicode => "UNICODE",
        }
    }

    /// Number of following symbols the marker consumes.
    pub fn arity(self) -> usize {
        match self {
            Marker::Phonetic => 2,
            _ => 1,
        }
    }
}

/// One alphabet slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Literal(&'static str),
    Marker(Marker),
    /// Slot seen in the wild whose meaning is unknown. Behaves like a marker.
    Reserved(u8),
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Glyph::Literal(s) => f.write_str(s),
            Glyph::Marker(m) => write!(f, "#{}#", m.name()),
            Glyph::Reserved(code) => write!(f, "#AL{}#", code),
        }
    }
}

/// A 64-slot sub-table with its placeholder prefix.
#[derive(Debug)]
pub struct SubTable {
    pub prefix: &'static str,
    pub entries: &'static [&'static str; 64],
    /// Unmapped slots with a named placeholder instead of a numbered one.
    pub named: &'static [(u8, &'static str)],
}

impl SubTable {
    /// Looks up `code`, returning `None` for unmapped slots.
    pub fn get(&self, code: u8) -> Option<&'static str> {
        self.entries
            .get(code as usize)
            .copied()
            .filter(|s| !s.is_empty())
    }

    /// Deterministic stand-in for an unmapped slot.
    pub fn placeholder(&self, code: u8) -> String {
        match self.named.iter().find(|&&(slot, _)| slot == code) {
            Some(&(_, name)) => name.to_string(),
            None => format!("#{}{}#", self.prefix, code),
        }
    }
}

/// The full set of tables one container decodes with.
///
/// Selected once from the container's [`FormatVariant`](crate::FormatVariant)
/// and handed to the decoders explicitly.
#[derive(Debug)]
pub struct SymbolTables {
    pub alphabet: &'static [Glyph; 64],
    pub uppercase: SubTable,
    pub phonetic_uppercase: SubTable,
    pub symbols: SubTable,
    pub special: SubTable,
    pub word_classes: &'static [&'static str],
}

impl SymbolTables {
    pub fn glyph(&self, code: u8) -> Glyph {
        self.alphabet[(code & 0x3F) as usize]
    }

    /// Word-class label for `code`, or `None` past the end of the table.
    pub fn word_class(&self, code: u8) -> Option<String> {
        self.word_classes.get(code as usize).map(|label| {
            if label.is_empty() {
                format!("#WC{}#", code)
            } else {
                (*label).to_string()
            }
        })
    }
}

use Glyph::{Literal as L, Marker as M, Reserved as R};

static STANDARD_ALPHABET: [Glyph; 64] = [
    L("\0"), L("a"), L("b"), L("c"), L("d"), L("e"), L("f"), L("g"),
    L("h"), L("i"), L("j"), L("k"), L("l"), L("m"), L("n"), L("o"),
    L("p"), L("q"), L("r"), L("s"), L("t"), L("u"), L("v"), L("w"),
    L("x"), L("y"), L("z"), R(27), R(28), R(29), R(30), R(31),
    L(" "), L("."), L("<"), L(">"), L(","), L(";"), L("-"), R(39),
    M(Marker::Grave), M(Marker::Acute), M(Marker::Circumflex), M(Marker::Tilde),
    M(Marker::Umlaut), R(45), M(Marker::DoubleAcute), M(Marker::Caron),
    M(Marker::Breve), M(Marker::Cedilla), M(Marker::Stroke), M(Marker::Sharp),
    L("β"), R(53), R(54), R(55),
    // 58 decodes as a plain `s` in Spanish entries.
    R(56), R(57), L("s"), M(Marker::Symbol),
    M(Marker::Phonetic), M(Marker::Uppercase), M(Marker::Special), M(Marker::Unicode),
];

static SMALL_ALPHABET: [Glyph; 64] = [
    L("\0"), L("a"), L("b"), L("c"), L("d"), L("e"), L("f"), L("g"),
    L("h"), L("i"), L("j"), L("k"), L("l"), L("m"), L("n"), L("o"),
    L("p"), L("q"), L("r"), L("s"), L("t"), L("u"), L("v"), L("w"),
    L("x"), L("y"), L("z"), L("á"), L("ä"), L("č"), L("ď"), L("é"),
    L("ě"), L("í"), R(34), R(35), L("ň"), L("ó"), L("ö"), R(39),
    L("ř"), L("š"), L("ť"), L("ú"), L("ů"), L("ü"), L("ý"), L("ž"),
    L("ß"), L(" "), L("."), L(","), L("-"), L("'"), L("("), L(")"),
    L("`"), L("\""), R(58), R(59),
    M(Marker::Uppercase), L("à"), M(Marker::Special), M(Marker::Unicode),
];

static STANDARD_UPPERCASE: [&str; 64] = [
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P",
    "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "", "", "", "", "", "",
];

static SMALL_UPPERCASE: [&str; 64] = [
    "\0", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "Á", "Ä", "Č", "Ď", "É",
    "Ě", "Í", "<", ">", "Ň", "Ó", "-", "", "Ř", "Š", "Ť", "Ú", "Ů", "Ü", "Ý", "Ž",
    "", " ", "", "", "", "", "", "", "", "", "", "", "", "À", "", "",
];

/// Uppercase slots mirroring punctuation of the small alphabet.
static SMALL_UPPERCASE_NAMED: [(u8, &str); 10] = [
    (50, "#UP.#"), (51, "#UP,#"), (52, "#UP-#"), (53, "#UP'#"), (54, "#UP(#"),
    (55, "#UP)#"), (56, "#UP`#"), (57, "#UP\"#"), (60, "#~UPCASE#"), (62, "#UP/#"),
];

/// IPA counterparts of the standard uppercase slots; `A` sits at slot 32.
static PHONETIC_UPPERCASE: [&str; 64] = [
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
    "ɑ", "", "ʧ", "ð", "ə", "ɜ", "", "æ", "ɪ", "ɭ", "", "ŋ", "", "ɳ", "ɔ", "",
    "ɒ", "ɽ", "ʃ", "θ", "ʊ", "ʌ", "", "", "", "ʒ", "", "", "", "", "", "",
];

static SYMBOLS: [&str; 64] = [
    "", "", "„", "…", "§", "", "", "", "‘", "’", "“", "”", "", "—", "", "™",
    "", "¡", "¢", "£", "¤", "", "", "§", "©", "", "", "", "®", "°", "", "²",
    "³", "", "", "", "¹", "", "", "", "½", "", "¿", "×", "÷", "", "", "",
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
];

static SPECIAL: [&str; 64] = [
    "", "!", "\"", "#", "$", "%", "&", "'", "(", ")", "*", "+", "", "", "", "/",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", ";", "<", "=", ">", "?",
    "@", "[", "\\", "]", "^", "_", "`", "{", "|", "}", "~", "", "", "", "", "",
    "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
];

/// Word classes; codes at or past the end of the table are rejected.
///
/// Deliberately 31 entries long, so a code of 31 is `FieldOutOfRange`
/// rather than `#WC31#`.
static WORD_CLASSES: [&str; 31] = [
    "subs:", "n:", "adj:", "pron:", "num:", "v:", "adv:", "prep:",
    "conj:", "part:", "intr:", "phr:", "", "", "", "",
    "", "", "", "", "m/f:", "m:", "f:", "",
    "", "", "", "", "", "", "",
];

pub static STANDARD_TABLES: SymbolTables = SymbolTables {
    alphabet: &STANDARD_ALPHABET,
    uppercase: SubTable { prefix: "UP", entries: &STANDARD_UPPERCASE, named: &[] },
    phonetic_uppercase: SubTable { prefix: "upr", entries: &PHONETIC_UPPERCASE, named: &[] },
    symbols: SubTable { prefix: "SY", entries: &SYMBOLS, named: &[] },
    special: SubTable { prefix: "SP", entries: &SPECIAL, named: &[] },
    word_classes: &WORD_CLASSES,
};

pub static SMALL_TABLES: SymbolTables = SymbolTables {
    alphabet: &SMALL_ALPHABET,
    uppercase: SubTable { prefix: "UP", entries: &SMALL_UPPERCASE, named: &SMALL_UPPERCASE_NAMED },
    phonetic_uppercase: SubTable { prefix: "upr", entries: &PHONETIC_UPPERCASE, named: &[] },
    symbols: SubTable { prefix: "SY", entries: &SYMBOLS, named: &[] },
    special: SubTable { prefix: "SP", entries: &SPECIAL, named: &[] },
    word_classes: &WORD_CLASSES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_alphabet_positions() {
        assert_eq!(STANDARD_TABLES.glyph(1), Glyph::Literal("a"));
        assert_eq!(STANDARD_TABLES.glyph(26), Glyph::Literal("z"));
        assert_eq!(STANDARD_TABLES.glyph(32), Glyph::Literal(" "));
        assert_eq!(STANDARD_TABLES.glyph(41), Glyph::Marker(Marker::Acute));
        assert_eq!(STANDARD_TABLES.glyph(61), Glyph::Marker(Marker::Uppercase));
        assert_eq!(STANDARD_TABLES.glyph(63), Glyph::Marker(Marker::Unicode));
    }

    #[test]
    fn small_alphabet_carries_czech_letters() {
        assert_eq!(SMALL_TABLES.glyph(29), Glyph::Literal("č"));
        assert_eq!(SMALL_TABLES.glyph(47), Glyph::Literal("ž"));
        assert_eq!(SMALL_TABLES.glyph(60), Glyph::Marker(Marker::Uppercase));
    }

    #[test]
    fn uppercase_letters_sit_at_32_in_standard_table() {
        assert_eq!(STANDARD_TABLES.uppercase.get(32), Some("A"));
        assert_eq!(STANDARD_TABLES.uppercase.get(57), Some("Z"));
        assert_eq!(STANDARD_TABLES.uppercase.get(5), None);
        assert_eq!(STANDARD_TABLES.uppercase.placeholder(5), "#UP5#");
    }

    #[test]
    fn word_class_lookup() {
        assert_eq!(STANDARD_TABLES.word_class(10).as_deref(), Some("intr:"));
        assert_eq!(STANDARD_TABLES.word_class(21).as_deref(), Some("m:"));
        assert_eq!(STANDARD_TABLES.word_class(12).as_deref(), Some("#WC12#"));
        assert_eq!(STANDARD_TABLES.word_class(31), None);
        assert_eq!(STANDARD_TABLES.word_class(200), None);
    }

    #[test]
    fn small_uppercase_punctuation_slots_have_named_placeholders() {
        let upper = &SMALL_TABLES.uppercase;
        assert_eq!(upper.get(50), None);
        assert_eq!(upper.placeholder(50), "#UP.#");
        assert_eq!(upper.placeholder(57), "#UP\"#");
        assert_eq!(upper.placeholder(60), "#~UPCASE#");
        assert_eq!(upper.placeholder(62), "#UP/#");
        assert_eq!(upper.placeholder(58), "#UP58#");
        assert_eq!(SMALL_TABLES.phonetic_uppercase.placeholder(54), "#upr54#");
    }

    #[test]
    fn glyph_placeholders_are_stable() {
        assert_eq!(Glyph::Marker(Marker::Caron).to_string(), "#CARON#");
        assert_eq!(Glyph::Reserved(27).to_string(), "#AL27#");
        assert_eq!(Glyph::Literal("x").to_string(), "x");
    }
}
