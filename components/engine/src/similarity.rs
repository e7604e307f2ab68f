//! Levenshtein-ratio similarity scoring.
//!
//! Used by paragraph alignment, move detection and stylistic/substantive
//! classification. Everything here is a pure function.

/// Computes the Levenshtein edit distance between two strings, by char.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Returns the normalized edit-distance similarity of two strings in `[0, 1]`.
///
/// `(max_len - levenshtein) / max_len`; two empty strings score `1.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Lower-cases, strips punctuation and collapses whitespace.
///
/// Case- or punctuation-only differences normalize to the same string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if is_punctuation(ch) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.extend(ch.to_lowercase());
    }
    out
}

/// Similarity of the normalized forms of `a` and `b`.
#[must_use]
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    similarity(&normalize(a), &normalize(b))
}

fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '‘' | '’' | '“' | '”' | '–' | '—' | '…' | '«' | '»' | '¡' | '¿' | '·'
        )
}
