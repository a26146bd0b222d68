//! Diacritic and phonetic composition.
//!
//! A diacritic marker is followed by one symbol naming the base character;
//! the phonetic marker is followed by two. The keys are alphabet glyphs, not
//! characters, because the format reuses marker and reserved slots as bases
//! for uppercase composites (e.g. `ACUTE` + `DACUT` is `Ó`).
//!
//! Only the standard alphabet carries these markers.

use super::tables::{Glyph, Marker};

use Glyph::{Literal as L, Marker as M, Reserved as R};

type CompositionMap = &'static [(Glyph, &'static str)];

static GRAVE: CompositionMap = &[(L("a"), "à"), (L("e"), "è"), (L("u"), "û")];

static UMLAUT: CompositionMap = &[
    (L("o"), "ö"),
    (L("u"), "ü"),
    (L("a"), "ä"),
    (L("e"), "ë"),
    (L("i"), "ï"),
    (L(" "), "Ä"),
    (M(Marker::DoubleAcute), "Ö"),
    (L("β"), "Ü"),
];

static ACUTE: CompositionMap = &[
    (L("a"), "á"),
    (L("e"), "é"),
    (L("i"), "í"),
    (L("n"), "ń"),
    (L("o"), "ó"),
    (L("u"), "ú"),
    (L("l"), "ĺ"),
    (L("r"), "ŕ"),
    (L("y"), "ý"),
    (L(" "), "Á"),
    (L(","), "É"),
    (M(Marker::DoubleAcute), "Ó"),
    (R(56), "Ý"),
    (M(Marker::Grave), "Í"),
    (M(Marker::Cedilla), "Ŕ"),
    (L("β"), "Ú"),
    (L("<"), "Ć"),
];

static CARON: CompositionMap = &[
    (L("r"), "ř"),
    (L("c"), "č"),
    (L("s"), "š"),
    (L("z"), "ž"),
    (L("e"), "ě"),
    (L("d"), "ď"),
    (L("t"), "ť"),
    (L("a"), "å"),
    (L("u"), "ů"),
    (L("n"), "ň"),
    (L("l"), "ľ"),
    (L("<"), "Č"),
    (L(">"), "Ď"),
    (M(Marker::Stroke), "Š"),
    (L(" "), "Å"),
    (L(","), "Ě"),
    (L("β"), "Ů"),
    (M(Marker::Tilde), "Ľ"),
    (M(Marker::Cedilla), "Ř"),
    (M(Marker::Sharp), "Ť"),
    (R(45), "Ň"),
    (R(57), "Ž"),
];

static SHARP: CompositionMap = &[
    (L("s"), "ß"),
    (L("o"), "œ"),
    (L("a"), "æ"),
    (M(Marker::DoubleAcute), "Œ"),
];

static TILDE: CompositionMap = &[(L("n"), "ñ"), (L("o"), "õ"), (L("a"), "ã"), (L("i"), "ĩ")];

static CIRCUMFLEX: CompositionMap = &[
    (L("a"), "â"),
    (L("e"), "ê"),
    (L("o"), "ô"),
    (L("i"), "î"),
    (L("u"), "û"),
    (L(" "), "Â"),
    (L(","), "Ê"),
    (M(Marker::Grave), "Î"),
    (M(Marker::DoubleAcute), "Ô"),
];

static CEDILLA: CompositionMap = &[
    (L("c"), "ç"),
    (L("e"), "ę"),
    (L("a"), "ą"),
    (L("k"), "ķ"),
    (L("i"), "ļ"),
    (L("n"), "ņ"),
    (L("<"), "Ç"),
];

static DOUBLE_ACUTE: CompositionMap = &[(L("u"), "ű"), (L("z"), "ż")];

static STROKE: CompositionMap = &[(L("l"), "ł")];

static BREVE: CompositionMap = &[(L("a"), "ă")];

static PHONETIC_PAIRS: &[((Glyph, Glyph), &str)] = &[
    ((L("e"), L("l")), "ɛ"),
    ((L("o"), L("u")), "ɶ"),
    ((L("o"), L("r")), "ɸ"),
    ((M(Marker::Cedilla), L("c")), "ʀ"),
    ((L("h"), L("i")), "ɥ"),
    ((L("n"), L("h")), "ɲ"),
    ((L("e"), L("x")), "ɛ̃"),
    ((L("c"), L("v")), "ɔ̃"),
    ((L("o"), L("v")), "œ̃"),
    ((L("a"), L("v")), "ɑ̃"),
];

/// Returns the composition map of a diacritic marker.
///
/// Table and phonetic markers have no map and yield `None`.
pub fn diacritic_map(marker: Marker) -> Option<CompositionMap> {
    match marker {
        Marker::Grave => Some(GRAVE),
        Marker::Acute => Some(ACUTE),
        Marker::Circumflex => Some(CIRCUMFLEX),
        Marker::Tilde => Some(TILDE),
        Marker::Umlaut => Some(UMLAUT),
        Marker::DoubleAcute => Some(DOUBLE_ACUTE),
        Marker::Caron => Some(CARON),
        Marker::Breve => Some(BREVE),
        Marker::Cedilla => Some(CEDILLA),
        Marker::Stroke => Some(STROKE),
        Marker::Sharp => Some(SHARP),
        Marker::Symbol
        | Marker::Phonetic
        | Marker::Uppercase
        | Marker::Special
        | Marker::Unicode => None,
    }
}

/// Composes `base` under a diacritic marker.
pub fn diacritic(marker: Marker, base: Glyph) -> Option<&'static str> {
    diacritic_map(marker)?
        .iter()
        .find(|(key, _)| *key == base)
        .map(|&(_, composed)| composed)
}

/// Resolves the two glyphs following a phonetic marker.
pub fn phonetic(first: Glyph, second: Glyph) -> Option<&'static str> {
    PHONETIC_PAIRS
        .iter()
        .find(|(key, _)| *key == (first, second))
        .map(|&(_, composed)| composed)
}
