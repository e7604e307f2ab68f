//! Paragraph alignment for side-by-side views.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::chunks::{Chunk, split_chunks};
use crate::similarity::normalized_similarity;

const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 0.6;

/// One row of an alignment: a baseline chunk, a current chunk, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentPair {
    /// Index into the baseline chunks; `None` for a purely added chunk.
    pub old_index: Option<usize>,
    /// Index into the current chunks; `None` for a purely removed chunk.
    pub new_index: Option<usize>,
}

impl AlignmentPair {
    /// Pairs two chunks.
    #[must_use]
    pub const fn matched(old_index: usize, new_index: usize) -> Self {
        Self {
            old_index: Some(old_index),
            new_index: Some(new_index),
        }
    }

    /// A chunk only present in the baseline.
    #[must_use]
    pub const fn removed(old_index: usize) -> Self {
        Self {
            old_index: Some(old_index),
            new_index: None,
        }
    }

    /// A chunk only present in the current snapshot.
    #[must_use]
    pub const fn added(new_index: usize) -> Self {
        Self {
            old_index: None,
            new_index: Some(new_index),
        }
    }

    /// Returns true if both sides are present.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.old_index.is_some() && self.new_index.is_some()
    }
}

/// Chunks of both snapshots and how they line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphAlignment {
    /// Baseline paragraphs.
    pub baseline: Vec<Chunk>,
    /// Current paragraphs.
    pub current: Vec<Chunk>,
    /// Alignment rows in display order.
    pub pairs: Vec<AlignmentPair>,
}

/// Aligns two chunk lists with the default similarity threshold.
#[must_use]
pub fn align_chunks<S: AsRef<str>>(baseline: &[S], current: &[S]) -> Vec<AlignmentPair> {
    align_chunks_with(baseline, current, DEFAULT_ALIGNMENT_THRESHOLD)
}

/// Aligns two chunk lists.
///
/// Exact matches are paired first, in order. Remaining baseline chunks then
/// each take the most similar unused current chunk scoring above `threshold`.
/// This is a first-found greedy pairing, not a global optimum.
///
/// Rows follow current order; an unmatched baseline chunk is emitted just
/// before the first match whose baseline index is greater than its own.
#[must_use]
#[instrument(skip_all, fields(baseline = baseline.len(), current = current.len()))]
pub fn align_chunks_with<S: AsRef<str>>(
    baseline: &[S],
    current: &[S],
    threshold: f64,
) -> Vec<AlignmentPair> {
    let mut old_to_new: Vec<Option<usize>> = vec![None; baseline.len()];
    let mut new_to_old: Vec<Option<usize>> = vec![None; current.len()];

    for (i, old) in baseline.iter().enumerate() {
        if let Some(j) =
            (0..current.len()).find(|&j| new_to_old[j].is_none() && current[j].as_ref() == old.as_ref())
        {
            old_to_new[i] = Some(j);
            new_to_old[j] = Some(i);
        }
    }

    for (i, old) in baseline.iter().enumerate() {
        if old_to_new[i].is_some() {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (j, new) in current.iter().enumerate() {
            if new_to_old[j].is_some() {
                continue;
            }
            let score = normalized_similarity(old.as_ref(), new.as_ref());
            if score > threshold && best.is_none_or(|(_, s)| score > s) {
                best = Some((j, score));
            }
        }
        if let Some((j, score)) = best {
            debug!(old = i, new = j, similarity = score, "Aligned similar chunks");
            old_to_new[i] = Some(j);
            new_to_old[j] = Some(i);
        }
    }

    let mut pending_removed = (0..baseline.len())
        .filter(|&i| old_to_new[i].is_none())
        .peekable();
    let mut pairs = Vec::with_capacity(baseline.len().max(current.len()));
    for (j, old) in new_to_old.iter().enumerate() {
        match *old {
            Some(i) => {
                while let Some(removed) = pending_removed.next_if(|&r| r < i) {
                    pairs.push(AlignmentPair::removed(removed));
                }
                pairs.push(AlignmentPair::matched(i, j));
            }
            None => pairs.push(AlignmentPair::added(j)),
        }
    }
    pairs.extend(pending_removed.map(AlignmentPair::removed));
    pairs
}

/// Splits both snapshots into paragraphs and aligns them.
#[must_use]
pub fn align_paragraphs(baseline: &str, current: &str) -> ParagraphAlignment {
    align_paragraphs_with(baseline, current, DEFAULT_ALIGNMENT_THRESHOLD)
}

pub(crate) fn align_paragraphs_with(
    baseline: &str,
    current: &str,
    threshold: f64,
) -> ParagraphAlignment {
    let baseline = split_chunks(baseline);
    let current = split_chunks(current);
    let old_texts: Vec<&str> = baseline.iter().map(|c| c.text.as_str()).collect();
    let new_texts: Vec<&str> = current.iter().map(|c| c.text.as_str()).collect();
    let pairs = align_chunks_with(&old_texts, &new_texts, threshold);
    ParagraphAlignment {
        baseline,
        current,
        pairs,
    }
}
