/// Link reservation ahead of inline tokenizing
use crate::ast::{Inline, Link};
use crate::patterns::{self, LinkMatchKind};

/// A character range the inline tokenizer treats as one opaque leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedSpan {
    /// Start offset in code points.
    pub start: usize,
    /// Exclusive end offset in code points.
    pub end: usize,
    /// Always an `Inline::Link`.
    pub leaf: Inline,
}

/// Immutable side table of reserved spans for one line, ordered by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedSpans {
    spans: Vec<ReservedSpan>,
}

impl ReservedSpans {
    /// Scans `line` for every non-overlapping link occurrence.
    pub fn scan(line: &str) -> Self {
        let mut spans = Vec::new();
        // Byte offsets from the regex are converted to code point offsets
        // while walking the line once.
        let mut chars_seen = 0;
        let mut bytes_seen = 0;
        let mut to_char_offset = |byte: usize| {
            chars_seen += line[bytes_seen..byte].chars().count();
            bytes_seen = byte;
            chars_seen
        };

        for found in patterns::find_links(line) {
            let start = to_char_offset(found.start);
            let end = to_char_offset(found.end);
            let leaf = match found.kind {
                LinkMatchKind::Masked { content, href } => Inline::Link(Link {
                    content: Some(content.to_string()),
                    href: href.to_string(),
                }),
                LinkMatchKind::Bare { href } => Inline::Link(Link {
                    content: None,
                    href: href.to_string(),
                }),
            };
            spans.push(ReservedSpan { start, end, leaf });
        }
        ReservedSpans { spans }
    }

    /// The span starting exactly at `pos`, if any.
    pub fn starting_at(&self, pos: usize) -> Option<&ReservedSpan> {
        self.spans
            .binary_search_by_key(&pos, |span| span.start)
            .ok()
            .map(|index| &self.spans[index])
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReservedSpan> {
        self.spans.iter()
    }
}
