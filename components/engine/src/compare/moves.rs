//! Move detection between paragraph chunks.

use tracing::debug;

use super::chunks::Chunk;
use super::spans::{EditSpan, SpanKind};
use crate::config::CompareConfig;
use crate::domain::TextRange;
use crate::similarity::{normalize, normalized_similarity};

/// A baseline chunk that reappears at a different rank in the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MovedChunk {
    pub baseline: usize,
    pub current: usize,
    pub similarity: f64,
}

/// Pairs chunks greedily and reports those whose relative order changed.
///
/// Each current chunk is claimed by at most one baseline chunk. A pair is a
/// move when its rank among the matched baseline chunks differs from its rank
/// among the matched current chunks. A chunk that only shifted because text
/// was added or removed around it keeps its rank and is not a move.
pub(crate) fn detect_moves(
    baseline: &[Chunk],
    current: &[Chunk],
    config: &CompareConfig,
) -> Vec<MovedChunk> {
    let mut used = vec![false; current.len()];
    let mut matches: Vec<MovedChunk> = Vec::new();

    for (i, old) in baseline.iter().enumerate() {
        if old.text.chars().count() < config.min_move_len {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (j, new) in current.iter().enumerate() {
            if used[j] {
                continue;
            }
            let score = normalized_similarity(&old.text, &new.text);
            if score >= config.move_threshold && best.is_none_or(|(_, s)| score > s) {
                best = Some((j, score));
            }
        }
        if let Some((j, score)) = best {
            used[j] = true;
            matches.push(MovedChunk {
                baseline: i,
                current: j,
                similarity: score,
            });
        }
    }

    // `matches` is already in baseline order, so the index is the baseline rank.
    let mut by_current: Vec<usize> = (0..matches.len()).collect();
    by_current.sort_by_key(|&m| matches[m].current);
    let mut current_rank = vec![0; matches.len()];
    for (rank, &m) in by_current.iter().enumerate() {
        current_rank[m] = rank;
    }

    matches
        .into_iter()
        .enumerate()
        .filter(|&(rank, _)| current_rank[rank] != rank)
        .map(|(_, moved)| moved)
        .inspect(|moved| {
            debug!(
                baseline = moved.baseline,
                current = moved.current,
                similarity = moved.similarity,
                "Detected moved chunk"
            );
        })
        .collect()
}

/// Drops insert/delete spans that only restate moved content.
///
/// A span is dropped when every chunk it touches on its own side is moved and
/// its normalized text is contained in the normalized text of those chunks.
pub(crate) fn suppress_moved_spans(
    spans: Vec<EditSpan>,
    moves: &[MovedChunk],
    baseline: &[Chunk],
    current: &[Chunk],
) -> Vec<EditSpan> {
    if moves.is_empty() {
        return spans;
    }
    let moved_baseline: Vec<usize> = moves.iter().map(|m| m.baseline).collect();
    let moved_current: Vec<usize> = moves.iter().map(|m| m.current).collect();

    spans
        .into_iter()
        .filter(|span| {
            let (range, chunks, moved) = match span.kind {
                SpanKind::Insert => (span.current, current, &moved_current),
                SpanKind::Delete => (span.baseline, baseline, &moved_baseline),
            };
            let keep = !restates_moves(&span.text, range, chunks, moved);
            if !keep {
                debug!(text = %span.text, "Suppressed span covered by a move");
            }
            keep
        })
        .collect()
}

fn restates_moves(text: &str, range: TextRange, chunks: &[Chunk], moved: &[usize]) -> bool {
    let touched = touched_chunks(range, chunks);
    if touched.is_empty() || !touched.iter().all(|i| moved.contains(i)) {
        return false;
    }
    let haystack = touched
        .iter()
        .map(|&i| normalize(&chunks[i].text))
        .collect::<Vec<_>>()
        .join(" ");
    haystack.contains(&normalize(text))
}

/// Chunks overlapping `range`; for a span that sits entirely between chunks,
/// the chunks it borders.
fn touched_chunks(range: TextRange, chunks: &[Chunk]) -> Vec<usize> {
    let overlapping: Vec<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.range.overlaps(&range))
        .map(|(i, _)| i)
        .collect();
    if !overlapping.is_empty() {
        return overlapping;
    }
    chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.range.to == range.from || c.range.from == range.to)
        .map(|(i, _)| i)
        .collect()
}
