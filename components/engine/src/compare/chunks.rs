//! Paragraph chunking.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::TextRange;
use crate::text::CharIndex;

static BLANK_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A paragraph-like block of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The paragraph text, trimmed.
    pub text: String,
    /// Char range of the trimmed text in its snapshot.
    pub range: TextRange,
}

/// Splits `text` into blank-line delimited chunks.
///
/// Whitespace-only paragraphs are skipped.
#[must_use]
pub fn split_chunks(text: &str) -> Vec<Chunk> {
    let regex = BLANK_LINE_REGEX.get_or_init(|| {
        Regex::new(r"\n[ \t\r]*\n\s*").expect("BLANK_LINE_REGEX should be valid")
    });
    let index = CharIndex::new(text);

    let mut chunks = Vec::new();
    let mut start = 0;
    let boundaries = regex
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));
    for (end, next) in boundaries {
        let segment = &text[start..end];
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            let lead = segment.len() - segment.trim_start().len();
            let from = start + lead;
            chunks.push(Chunk {
                text: trimmed.to_string(),
                range: TextRange::new(index.char_at(from), index.char_at(from + trimmed.len())),
            });
        }
        start = next;
    }
    chunks
}
