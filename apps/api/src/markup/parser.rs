//! Tag parser for rewrite markup. Splits annotated resume text into plain and tagged runs.
//!
//! Annotated text carries three inline tag pairs: `<ADD>`, `<DEL>` and `<REWRITE>`.
//! Tags never nest. Anything that does not match a complete pair is plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One pattern, three alternatives. Bodies are non-greedy and may span lines.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<ADD>(?P<add>.*?)</ADD>|<DEL>(?P<del>.*?)</DEL>|<REWRITE>(?P<rewrite>.*?)</REWRITE>")
        .expect("tag pattern is a valid regex")
});

/// Category of a parsed run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Plain,
    Added,
    Deleted,
    Rewritten,
}

/// A run of text borrowed from the annotated input.
/// Tagged runs hold the inner text only; delimiters are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    fn new(kind: SegmentKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Parses annotated text into ordered segments.
///
/// - Empty input yields no segments.
/// - Input without recognized tags yields a single plain segment.
/// - Empty tag bodies yield zero-length tagged segments.
/// - Zero-length plain runs (between adjacent tags) are never emitted.
pub fn parse(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in TAG_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > cursor {
            segments.push(Segment::new(SegmentKind::Plain, &text[cursor..whole.start()]));
        }

        let tagged = if let Some(m) = caps.name("add") {
            Segment::new(SegmentKind::Added, m.as_str())
        } else if let Some(m) = caps.name("del") {
            Segment::new(SegmentKind::Deleted, m.as_str())
        } else if let Some(m) = caps.name("rewrite") {
            Segment::new(SegmentKind::Rewritten, m.as_str())
        } else {
            // unreachable with the current pattern; keep the raw match rather than drop it
            Segment::new(SegmentKind::Plain, whole.as_str())
        };
        segments.push(tagged);

        cursor = whole.end();
    }

    if cursor < text.len() {
        segments.push(Segment::new(SegmentKind::Plain, &text[cursor..]));
    }

    segments
}

/// Clean view: tags stripped, deleted content removed, everything else verbatim.
pub fn clean(text: &str) -> String {
    parse(text)
        .into_iter()
        .filter(|s| s.kind != SegmentKind::Deleted)
        .map(|s| s.text)
        .collect()
}

/// Changes view: every span kept and categorized, deleted content included.
pub fn changes(text: &str) -> Vec<Segment<'_>> {
    parse(text)
}
