//! Static diff & alignment engine.
//!
//! Compares two plain-text snapshots in five steps:
//! 1. Token-level Myers diff, walked into positioned insert/delete spans
//! 2. Paragraph chunking of both snapshots
//! 3. Move detection, dropping spans that only restate moved paragraphs
//! 4. Replacement grouping of adjacent delete/insert pairs
//! 5. Substantive/stylistic classification
//!
//! Every call is a pure function of its inputs; a [`Comparer`] can be shared
//! across threads.

pub mod align;
pub mod chunks;
pub mod classify;
mod grouping;
mod moves;
mod spans;
pub mod summary;

pub use align::{AlignmentPair, ParagraphAlignment, align_chunks, align_chunks_with, align_paragraphs};
pub use chunks::{Chunk, split_chunks};
pub use classify::classify;
pub use summary::DiffSummary;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::CompareConfig;
use crate::diff::{DiffAlgorithm, Granularity, MyersDiff};
use crate::domain::{Author, ChangeKind, ChangeRecord};

/// Records produced by one comparison, with their statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Change records sorted by position.
    pub changes: Vec<ChangeRecord>,
    /// Counts over `changes`.
    pub summary: DiffSummary,
}

/// Configured entry point of the static engine.
#[derive(Debug, Clone)]
pub struct Comparer<D: DiffAlgorithm = MyersDiff> {
    config: CompareConfig,
    author: Author,
    granularity: Granularity,
    algorithm: D,
}

impl Comparer<MyersDiff> {
    /// Creates a word-level comparer with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CompareConfig::default(),
            author: Author::anonymous(),
            granularity: Granularity::default(),
            algorithm: MyersDiff::new(),
        }
    }
}

impl Default for Comparer<MyersDiff> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DiffAlgorithm> Comparer<D> {
    /// Replaces the thresholds.
    #[must_use]
    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    /// Attributes produced records to `author`.
    #[must_use]
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    /// Sets the token granularity.
    #[must_use]
    pub const fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Swaps the token diff algorithm.
    #[must_use]
    pub fn with_algorithm<E: DiffAlgorithm>(self, algorithm: E) -> Comparer<E> {
        Comparer {
            config: self.config,
            author: self.author,
            granularity: self.granularity,
            algorithm,
        }
    }

    /// The active thresholds.
    #[must_use]
    pub const fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// The active token granularity.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Compares two snapshots.
    ///
    /// Identical or empty snapshots yield no records.
    #[must_use]
    #[instrument(skip_all, fields(granularity = ?self.granularity))]
    pub fn compare(&self, baseline: &str, current: &str) -> Comparison {
        if baseline == current {
            return Comparison {
                changes: Vec::new(),
                summary: DiffSummary::default(),
            };
        }
        let timestamp = chrono::Utc::now().timestamp_millis();

        let spans = spans::edit_spans(baseline, current, self.granularity, &self.algorithm);
        let baseline_chunks = split_chunks(baseline);
        let current_chunks = split_chunks(current);
        let moved = moves::detect_moves(&baseline_chunks, &current_chunks, &self.config);
        let span_count = spans.len();
        let spans = moves::suppress_moved_spans(spans, &moved, &baseline_chunks, &current_chunks);

        let mut changes = grouping::group_spans(spans, &self.config, &self.author, timestamp);
        classify::classify_records(&mut changes, &self.config);
        changes.extend(moved.iter().map(|m| {
            let (old, new) = (&baseline_chunks[m.baseline], &current_chunks[m.current]);
            ChangeRecord::moved(
                new.range,
                old.range,
                old.text.clone(),
                new.text.clone(),
                self.author.clone(),
                timestamp,
                m.similarity,
            )
        }));
        changes.sort_by_key(|r| (r.range.from, kind_order(r.kind)));

        let summary = DiffSummary::from_records(&changes, self.config.high_confidence);
        debug!(
            spans = span_count,
            moves = summary.moves,
            total = summary.total,
            "Compared snapshots"
        );
        Comparison { changes, summary }
    }

    /// Aligns the paragraphs of two snapshots using the configured threshold.
    #[must_use]
    pub fn align(&self, baseline: &str, current: &str) -> ParagraphAlignment {
        align::align_paragraphs_with(baseline, current, self.config.alignment_threshold)
    }
}

const fn kind_order(kind: ChangeKind) -> u8 {
    match kind {
        ChangeKind::Deletion => 0,
        ChangeKind::Replacement => 1,
        ChangeKind::Insertion => 2,
        ChangeKind::Move => 3,
    }
}

/// Compares two snapshots with default thresholds.
#[must_use]
pub fn diff_snapshots(baseline: &str, current: &str, granularity: Granularity) -> Vec<ChangeRecord> {
    Comparer::new()
        .with_granularity(granularity)
        .compare(baseline, current)
        .changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, TextRange};

    #[test]
    fn test_inserted_word() {
        let changes = diff_snapshots(
            "The quick fox jumps.",
            "The quick brown fox jumps.",
            Granularity::Word,
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Insertion);
        assert_eq!(changes[0].inserted(), "brown ");
        assert_eq!(changes[0].range, TextRange::new(10, 16));
        assert!(changes[0].classification.is_some_and(|c| c.is_substantive));
    }

    #[test]
    fn test_case_change_is_stylistic_replacement() {
        let changes = diff_snapshots("Hello World", "hello world", Granularity::Word);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Replacement);
        assert_eq!(changes[0].classification, Some(Classification::STYLISTIC));
    }

    #[test]
    fn test_swapped_paragraphs_report_only_moves() {
        let alpha = "Alpha paragraph talks about apples.";
        let beta = "Beta paragraph talks about bananas.";
        let gamma = "Gamma paragraph stays where it was.";
        let comparison = Comparer::new().compare(
            &format!("{alpha}\n\n{beta}\n\n{gamma}"),
            &format!("{beta}\n\n{alpha}\n\n{gamma}"),
        );
        assert_eq!(comparison.summary.moves, 2);
        assert_eq!(comparison.summary.total, 2);
        let first = &comparison.changes[0];
        assert_eq!(first.inserted(), beta);
        assert_eq!(first.range, TextRange::new(0, 35));
        assert_eq!(first.original_range, Some(TextRange::new(37, 72)));
        assert!(first.classification.is_none());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(diff_snapshots("", "", Granularity::Word).is_empty());
        assert!(diff_snapshots("same", "same", Granularity::Line).is_empty());

        let added = diff_snapshots("", "new text", Granularity::Word);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].kind, ChangeKind::Insertion);

        let removed = diff_snapshots("old text", "", Granularity::Word);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].kind, ChangeKind::Deletion);
        assert_eq!(removed[0].range, TextRange::point(0));
    }

    #[test]
    fn test_records_sorted_with_deletion_first_on_ties() {
        let old = "Keep this. Remove a totally unrelated clause about weather patterns here. End.";
        let new = "Keep this. Insert zzz qqq xxx vvv kkk jjj www yyy ppp mmm. End.";
        let changes = Comparer::new()
            .with_granularity(Granularity::Sentence)
            .compare(old, new)
            .changes;
        let kinds: Vec<ChangeKind> = changes.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Deletion, ChangeKind::Insertion]);
        assert_eq!(changes[0].range.from, changes[1].range.from);
    }

    #[test]
    fn test_author_attribution_and_summary() {
        let author = Author::agent("model", "Assistant").unwrap();
        let comparison = Comparer::new()
            .with_author(author.clone())
            .compare("one two three", "one 2 three");
        assert!(comparison.changes.iter().all(|r| r.author == author));
        assert_eq!(comparison.summary.replacements, 1);
        assert_eq!(comparison.summary.substantive, 1);
    }

    #[test]
    fn test_line_granularity() {
        let changes = diff_snapshots("a\nb\nc\n", "a\nB\nc\n", Granularity::Line);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].deleted(), "b\n");
        assert_eq!(changes[0].inserted(), "B\n");
    }
}
