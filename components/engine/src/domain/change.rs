//! Change records.
//!
//! A `ChangeRecord` is the atomic unit both engines produce: one attributed,
//! positioned insertion, deletion, replacement or move.

use serde::{Deserialize, Serialize};

use super::{Author, ChangeId};

/// Half-open `[from, to)` char range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive).
    pub to: usize,
}

impl TextRange {
    /// Creates a range. `from` must not exceed `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to);
        Self { from, to }
    }

    /// Creates an empty range at `pos`.
    #[must_use]
    pub const fn point(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Number of chars covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to - self.from
    }

    /// Returns true if the range covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Returns true if both ranges share at least one char. An empty range
    /// overlaps nothing.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.from < other.to && other.from < self.to
    }

    /// Returns true if `pos` lies inside the range (end exclusive).
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }
}

/// Type of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Text was added.
    Insertion,
    /// Text was removed.
    Deletion,
    /// Text was removed and other text put in its place.
    Replacement,
    /// A chunk appears at a structurally different position.
    Move,
}

/// Review status of a live change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeStatus {
    /// Recorded, awaiting review.
    Pending,
    /// Kept in the document.
    Accepted,
    /// Reverted from the document.
    Rejected,
}

impl ChangeStatus {
    /// Returns true for `Accepted` and `Rejected`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// Substantive/stylistic flags computed by the static engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// The change alters normalized meaning.
    pub is_substantive: bool,
    /// The change touches case, punctuation or spacing.
    pub is_stylistic: bool,
}

impl Classification {
    /// Only case, punctuation or whitespace changed.
    pub const STYLISTIC: Self = Self {
        is_substantive: false,
        is_stylistic: true,
    };
    /// Content changed.
    pub const SUBSTANTIVE: Self = Self {
        is_substantive: true,
        is_stylistic: false,
    };
    /// Content changed slightly and its style changed too.
    pub const BOTH: Self = Self {
        is_substantive: true,
        is_stylistic: true,
    };
}

/// One attributed, positioned change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Unique id.
    pub id: ChangeId,
    /// Insertion, deletion, replacement or move.
    pub kind: ChangeKind,
    /// Position in the current document. Deletions are always empty ranges.
    pub range: TextRange,
    /// Position before the edit that produced the record.
    pub original_range: Option<TextRange>,
    /// Text added by the change.
    pub inserted_text: Option<String>,
    /// Text removed by the change.
    pub deleted_text: Option<String>,
    /// Who made the change.
    pub author: Author,
    /// Milliseconds on the session clock (live) or comparison time (static).
    pub timestamp: i64,
    /// Review status (live engine).
    pub status: ChangeStatus,
    /// Substantive/stylistic flags (static engine).
    pub classification: Option<Classification>,
    /// Confidence in `[0, 1]`; below 1 for heuristic results.
    pub confidence: f64,
}

impl ChangeRecord {
    fn base(kind: ChangeKind, range: TextRange, author: Author, timestamp: i64) -> Self {
        Self {
            id: ChangeId::new(),
            kind,
            range,
            original_range: None,
            inserted_text: None,
            deleted_text: None,
            author,
            timestamp,
            status: ChangeStatus::Pending,
            classification: None,
            confidence: 1.0,
        }
    }

    /// Creates an insertion occupying `range` in the current document.
    #[must_use]
    pub fn insertion(
        range: TextRange,
        text: impl Into<String>,
        author: Author,
        timestamp: i64,
    ) -> Self {
        let mut record = Self::base(ChangeKind::Insertion, range, author, timestamp);
        record.original_range = Some(TextRange::point(range.from));
        record.inserted_text = Some(text.into());
        record
    }

    /// Creates a deletion anchored at `at`, removed from `original_range`.
    #[must_use]
    pub fn deletion(
        at: usize,
        original_range: TextRange,
        text: impl Into<String>,
        author: Author,
        timestamp: i64,
    ) -> Self {
        let mut record = Self::base(ChangeKind::Deletion, TextRange::point(at), author, timestamp);
        record.original_range = Some(original_range);
        record.deleted_text = Some(text.into());
        record
    }

    /// Creates a replacement whose new text occupies `range`.
    #[must_use]
    pub fn replacement(
        range: TextRange,
        original_range: TextRange,
        deleted: impl Into<String>,
        inserted: impl Into<String>,
        author: Author,
        timestamp: i64,
    ) -> Self {
        let mut record = Self::base(ChangeKind::Replacement, range, author, timestamp);
        record.original_range = Some(original_range);
        record.deleted_text = Some(deleted.into());
        record.inserted_text = Some(inserted.into());
        record
    }

    /// Creates a move from `original_range` (baseline) to `range` (current).
    #[must_use]
    pub fn moved(
        range: TextRange,
        original_range: TextRange,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
        author: Author,
        timestamp: i64,
        confidence: f64,
    ) -> Self {
        let mut record = Self::base(ChangeKind::Move, range, author, timestamp);
        record.original_range = Some(original_range);
        record.deleted_text = Some(old_text.into());
        record.inserted_text = Some(new_text.into());
        record.confidence = confidence.clamp(0.0, 1.0);
        record
    }

    /// Returns the inserted text, or `""`.
    #[must_use]
    pub fn inserted(&self) -> &str {
        self.inserted_text.as_deref().unwrap_or_default()
    }

    /// Returns the deleted text, or `""`.
    #[must_use]
    pub fn deleted(&self) -> &str {
        self.deleted_text.as_deref().unwrap_or_default()
    }

    /// Returns true if the record occupies text in the current document.
    #[must_use]
    pub const fn has_inserted_span(&self) -> bool {
        matches!(self.kind, ChangeKind::Insertion | ChangeKind::Replacement)
    }

    /// Returns true if the record still carries removed text to restore.
    #[must_use]
    pub const fn has_deleted_text(&self) -> bool {
        matches!(self.kind, ChangeKind::Deletion | ChangeKind::Replacement)
    }

    /// Returns true while the record awaits review.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ChangeStatus::Pending
    }
}
