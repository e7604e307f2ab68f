//! Char-offset helpers.
//!
//! Every offset the engine exposes counts Unicode scalar values, not bytes.
//! These helpers translate between the two so callers can slice and edit
//! `String`s safely.

/// Returns the number of chars in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Converts a char offset into a byte offset.
///
/// Returns `None` when `pos` lies past the end of `text`. `pos == char_len`
/// maps to `text.len()`.
#[must_use]
pub fn byte_offset(text: &str, pos: usize) -> Option<usize> {
    if pos == 0 {
        return Some(0);
    }
    let mut count = 0;
    for (byte, _) in text.char_indices() {
        if count == pos {
            return Some(byte);
        }
        count += 1;
    }
    (count == pos).then_some(text.len())
}

/// Returns the substring between two char offsets.
///
/// Out-of-range offsets are clamped to the end of `text`.
#[must_use]
pub fn slice_chars(text: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(text, from).unwrap_or(text.len());
    let end = byte_offset(text, to).unwrap_or(text.len()).max(start);
    &text[start..end]
}

/// Replaces the chars in `[from, to)` with `insert`.
///
/// Returns `false` and leaves `text` untouched when the range does not fit.
pub fn replace_chars(text: &mut String, from: usize, to: usize, insert: &str) -> bool {
    if from > to {
        return false;
    }
    match (byte_offset(text, from), byte_offset(text, to)) {
        (Some(start), Some(end)) => {
            text.replace_range(start..end, insert);
            true
        }
        _ => false,
    }
}

/// Precomputed char → byte table for repeated conversions on one string.
#[derive(Debug, Clone)]
pub struct CharIndex {
    bytes: Vec<usize>,
}

impl CharIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        bytes.push(text.len());
        Self { bytes }
    }

    /// Number of chars in the indexed text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Converts a char offset into a byte offset, clamping to the end.
    #[must_use]
    pub fn byte_at(&self, pos: usize) -> usize {
        self.bytes[pos.min(self.bytes.len() - 1)]
    }

    /// Converts a byte offset (on a char boundary) into a char offset.
    #[must_use]
    pub fn char_at(&self, byte: usize) -> usize {
        self.bytes.partition_point(|&b| b < byte)
    }
}
