//! Field tags and rendering order.
//!
//! Headword, header data, sample and pronunciation fields go on the line
//! directly. Everything else of an item is collected into the item body,
//! which is appended as `\n{n}. {body}` when the item is numbered.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::MarkupStyle;
use crate::trd::types::entry::{DataItem, DecodedRecord, Phrase};

/// Prefix and suffix wrapped around one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag(pub &'static str, pub &'static str);

impl Tag {
    fn wrap(self, out: &mut String, text: &str) {
        out.push_str(self.0);
        out.push_str(text);
        out.push_str(self.1);
    }
}

/// Tags for every field kind of one markup style.
#[derive(Debug)]
pub struct TagSet {
    /// Item bullet.
    pub bullet: Tag,
    pub name: Tag,
    pub variant: Tag,
    pub word_class: Tag,
    pub parts: Tag,
    pub forms: Tag,
    pub origin_note: Tag,
    pub pronunciation: Tag,
    pub sub_example: Tag,
    pub source: Tag,
    pub data_variant: Tag,
    pub plural_variant: Tag,
    pub example: Tag,
    pub sample: Tag,
    pub sample_word_class: Tag,
    pub sample_origin: Tag,
    pub definition: Tag,
    pub note: Tag,
    pub short_phrase: Tag,
    pub green_phrase: Tag,
    pub phrase_comment: Tag,
    pub phrase: Tag,
    pub translation: Tag,
    pub simple_phrase: Tag,
    pub block_phrase: Tag,
    pub block_translation: Tag,
}

pub static NONE_TAGS: TagSet = TagSet {
    bullet: Tag("", ""),
    name: Tag("", "\t"),
    variant: Tag("", " "),
    word_class: Tag("(", ")"),
    parts: Tag("", " "),
    forms: Tag("(", ") "),
    origin_note: Tag("(", ")"),
    pronunciation: Tag("[", "]"),
    sub_example: Tag("(", ")"),
    source: Tag("(", ") "),
    data_variant: Tag("{", "} "),
    plural_variant: Tag("/", "/ "),
    example: Tag("(", ") "),
    sample: Tag("`", "`"),
    sample_word_class: Tag("", ""),
    sample_origin: Tag("`", "`"),
    definition: Tag("", " "),
    note: Tag("", " "),
    short_phrase: Tag("\"", "\" "),
    green_phrase: Tag("\"", " = "),
    phrase_comment: Tag("`", "`"),
    phrase: Tag("\"", " = "),
    translation: Tag("", "\" "),
    simple_phrase: Tag("\"", " = "),
    block_phrase: Tag("\"", " = "),
    block_translation: Tag("\" ", ""),
};

pub static ESCAPED_TAGS: TagSet = TagSet {
    bullet: Tag("•", ""),
    name: Tag("", "\t"),
    variant: Tag("", " "),
    word_class: Tag("", "\\n"),
    parts: Tag("", ":\\n"),
    forms: Tag("(", ") "),
    origin_note: Tag("(", ")\\n"),
    pronunciation: Tag("[", "]\\n"),
    sub_example: Tag("(", ")"),
    source: Tag("(", ")\\n"),
    data_variant: Tag("{", "} "),
    plural_variant: Tag("/", "/\\n"),
    example: Tag("(", ")\\n"),
    sample: Tag("    ", "\\n"),
    sample_word_class: Tag("", ""),
    sample_origin: Tag("    ", " "),
    definition: Tag("    ", "\\n"),
    note: Tag("    ", "\\n"),
    short_phrase: Tag("    ", "\\n"),
    green_phrase: Tag("    ", " "),
    phrase_comment: Tag("    ", " "),
    phrase: Tag("    ", " "),
    translation: Tag("      ", "\\n"),
    simple_phrase: Tag("    ", "\\n"),
    block_phrase: Tag("\"", " = "),
    block_translation: Tag("\" ", ""),
};

pub static MARKUP_TAGS: TagSet = TagSet {
    bullet: Tag("•", ""),
    name: Tag("", "\t"),
    variant: Tag("", " "),
    word_class: Tag(
        "<span size=\"larger\" color=\"darkred\" weight=\"bold\">",
        "</span>\\n",
    ),
    parts: Tag(
        "<span size=\"larger\" color=\"darkred\" weight=\"bold\">",
        ":</span>\\n",
    ),
    forms: Tag("(", ") "),
    origin_note: Tag("<span color=\"blue\">(", ")</span>\\n"),
    pronunciation: Tag("[", "]\\n"),
    sub_example: Tag("(", ")"),
    source: Tag("(", ")\\n"),
    data_variant: Tag("{", "} "),
    plural_variant: Tag("/", "/\\n"),
    example: Tag("(", ")\\n"),
    sample: Tag("    <span color=\"darkred\" weight=\"bold\">", "</span>\\n"),
    sample_word_class: Tag("", ""),
    sample_origin: Tag("    <span color=\"darkred\" weight=\"bold\">", "</span> "),
    definition: Tag("    <span weight=\"bold\">", "</span>\\n"),
    note: Tag("", ""),
    short_phrase: Tag("    <span color=\"dimgray\" weight=\"bold\">", "</span>\\n"),
    green_phrase: Tag("    <span color=\"darkgreen\" style=\"italic\">", "</span> "),
    phrase_comment: Tag("    <span color=\"darkgreen\" style=\"italic\">", "</span> "),
    phrase: Tag("    <span color=\"dimgray\" style=\"italic\">", "</span> "),
    translation: Tag("      ", "\\n"),
    simple_phrase: Tag("    <span color=\"cyan\">", "</span>\\n"),
    block_phrase: Tag("\"", " = "),
    block_translation: Tag("\" ", ""),
};

/// Inline format tags embedded in dictionary text, e.g. `<aformal>`.
static INLINE_TAG: OnceLock<Regex> = OnceLock::new();

fn inline_tag_regex() -> &'static Regex {
    INLINE_TAG.get_or_init(|| {
        Regex::new(r"<([acdeEfghiIlLnNopqrtuvwxyz^])(.*?)>").expect("Invalid inline tag pattern")
    })
}

/// Rewrites inline format tags for `style`.
pub fn rewrite_inline_tags(text: &str, style: MarkupStyle) -> Cow<'_, str> {
    inline_tag_regex().replace_all(text, |caps: &Captures| {
        let inner = &caps[2];
        match (style, &caps[1]) {
            (MarkupStyle::None | MarkupStyle::Escaped, _) => format!("({})", inner),
            (MarkupStyle::Markup, "d") => format!("<span size=\"small\" color=\"blue\">({})</span>", inner),
            (MarkupStyle::Markup, "x") => {
                format!("<span size=\"small\" color=\"brown\" style=\"italic\">{}</span>", inner)
            }
            (MarkupStyle::Markup, _) => {
                format!("<span size=\"small\" color=\"blue\" style=\"italic\">{}</span>", inner)
            }
        }
    })
}

/// Renders a decoded record without the line terminator.
pub fn render(record: &DecodedRecord, style: MarkupStyle) -> String {
    let tags = style.tags();
    let mut line = String::new();

    if let Some(hw) = &record.headword {
        let fields = [
            (&hw.name, tags.name),
            (&hw.variant, tags.variant),
            (&hw.word_class, tags.word_class),
            (&hw.parts, tags.parts),
            (&hw.forms, tags.forms),
            (&hw.origin_note, tags.origin_note),
            (&hw.pronunciation, tags.pronunciation),
        ];
        for (text, tag) in fields {
            if let Some(text) = text {
                tag.wrap(&mut line, text);
            }
        }
    }

    if let Some(data) = &record.header_data {
        let fields = [
            (&data.source, tags.source),
            (&data.data_variant, tags.data_variant),
            (&data.example, tags.example),
            (&data.plural_variant, tags.plural_variant),
        ];
        for (text, tag) in fields {
            if let Some(text) = text {
                tag.wrap(&mut line, text);
            }
        }
    }

    for item in &record.items {
        render_item(item, tags, &mut line);
    }

    rewrite_inline_tags(&line, style).into_owned()
}

fn render_item(item: &DataItem, tags: &TagSet, line: &mut String) {
    let mut body = String::new();
    tags.bullet.wrap(&mut body, "");

    if let Some(sample) = &item.sample {
        if let Some(text) = &sample.text {
            tags.sample.wrap(line, text);
        }
        if let Some(variant) = &sample.variant {
            tags.sample.wrap(line, variant);
        }
        if let Some(wc) = &sample.word_class {
            tags.word_class.wrap(line, wc);
        }
        if let Some(note) = &sample.word_class_note {
            tags.sample_word_class.wrap(line, note);
        }
        if let Some(origin) = &sample.origin_note {
            tags.sample_origin.wrap(&mut body, origin);
        }
        if let Some(pron) = &sample.pronunciation {
            body.push_str("    ");
            tags.pronunciation.wrap(line, pron);
        }
    }

    if let Some(sub) = &item.sub {
        body.push_str("    ");
        if let Some(example) = &sub.example {
            tags.sub_example.wrap(&mut body, example);
        }
    }

    if let Some(def) = &item.definition {
        tags.definition.wrap(&mut body, def);
    }
    if let Some(note) = &item.note {
        tags.note.wrap(&mut body, &note.text);
    }

    for phrase in &item.phrases {
        match phrase {
            Phrase::Short(text) => tags.short_phrase.wrap(&mut body, text),
            Phrase::Pair {
                comment,
                phrase,
                translation,
            } => {
                if let Some(comment) = comment {
                    tags.phrase_comment.wrap(&mut body, comment);
                }
                tags.phrase.wrap(&mut body, phrase);
                tags.translation.wrap(&mut body, translation);
            }
            Phrase::Green {
                comment,
                phrase,
                translation,
            } => {
                if let Some(comment) = comment {
                    tags.phrase_comment.wrap(&mut body, comment);
                }
                tags.green_phrase.wrap(&mut body, phrase);
                tags.translation.wrap(&mut body, translation);
            }
            Phrase::Simple(text) => tags.simple_phrase.wrap(&mut body, text),
        }
    }

    if let Some(block) = &item.phrase_block {
        line.push_str("\\nphr: ");
        tags.block_phrase.wrap(&mut body, &block.phrase);
        tags.block_translation.wrap(&mut body, &block.translation);
    }

    match item.ordinal {
        Some(n) => {
            line.push_str(&format!("\\n{}. ", n));
            line.push_str(&body);
        }
        None => line.push_str(&body),
    }
}
