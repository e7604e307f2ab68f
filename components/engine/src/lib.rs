//! Revise Engine
//!
//! The revision engine turns document edits into attributed change records:
//! 1. The static engine ([`compare`]) diffs two text snapshots, detects moved
//!    paragraphs and classifies every change as substantive or stylistic.
//! 2. The live engine ([`tracking`]) records a stream of edit operations as
//!    pending changes and can accept or reject them without corrupting the
//!    document.
//!
//! Both share the [`similarity`] scorer and the change-record model in
//! [`domain`]. The crate performs no I/O.

pub mod compare;
pub mod config;
pub mod diff;
pub mod domain;
pub mod similarity;
pub mod text;
pub mod tracking;

pub use compare::{
    AlignmentPair, Chunk, Comparer, Comparison, DiffSummary, ParagraphAlignment, align_chunks,
    align_paragraphs, diff_snapshots, split_chunks,
};
pub use config::{CompareConfig, TrackingConfig};
pub use diff::Granularity;
pub use domain::{
    Author, AuthorId, AuthorKind, ChangeId, ChangeKind, ChangeRecord, ChangeSet, ChangeStatus,
    Classification, DocumentPatch, PatchEdit, TextRange, TrackingError, ValidationError,
};
pub use similarity::{levenshtein, normalize, normalized_similarity, similarity};
pub use tracking::{
    Clock, EditOp, EditOrigin, EditShape, ManualClock, ReviewMark, SystemClock, TrackingSession,
};
