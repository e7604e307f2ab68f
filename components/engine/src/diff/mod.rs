//! Token-level diff algorithms.
//!
//! This module provides a trait-based approach to diff algorithms over token
//! streams, allowing implementations to be swapped while the static engine
//! keeps a consistent interface.

pub mod myers;
pub mod tokenize;

pub use myers::MyersDiff;
pub use tokenize::{Granularity, Token, tokenize};

/// A single diff operation over two token sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// Tokens that are unchanged between both sequences.
    Equal {
        /// Start token index in the old sequence (inclusive).
        old_start: usize,
        /// End token index in the old sequence (exclusive).
        old_end: usize,
        /// Start token index in the new sequence (inclusive).
        new_start: usize,
        /// End token index in the new sequence (exclusive).
        new_end: usize,
    },
    /// Tokens that were inserted in the new sequence.
    Insert {
        /// Start token index in the new sequence (inclusive).
        new_start: usize,
        /// End token index in the new sequence (exclusive).
        new_end: usize,
    },
    /// Tokens that were deleted from the old sequence.
    Delete {
        /// Start token index in the old sequence (inclusive).
        old_start: usize,
        /// End token index in the old sequence (exclusive).
        old_end: usize,
    },
}

impl DiffOp {
    /// Returns the range of tokens affected in the old sequence, if applicable.
    #[must_use]
    pub fn old_range(&self) -> Option<(usize, usize)> {
        match self {
            Self::Equal {
                old_start, old_end, ..
            }
            | Self::Delete { old_start, old_end } => Some((*old_start, *old_end)),
            Self::Insert { .. } => None,
        }
    }

    /// Returns the range of tokens affected in the new sequence, if applicable.
    #[must_use]
    pub fn new_range(&self) -> Option<(usize, usize)> {
        match self {
            Self::Equal {
                new_start, new_end, ..
            }
            | Self::Insert { new_start, new_end } => Some((*new_start, *new_end)),
            Self::Delete { .. } => None,
        }
    }

    /// Returns true if this operation represents a change (not equal).
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }

    /// Returns the number of old tokens covered.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.old_range().map_or(0, |(s, e)| e - s)
    }

    /// Returns the number of new tokens covered.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.new_range().map_or(0, |(s, e)| e - s)
    }
}

/// Trait for diff algorithms.
///
/// Implementations can use different algorithms (Myers, patience, histogram, etc.)
/// while maintaining a consistent API. The `Send + Sync` bounds allow a single
/// instance to serve concurrent comparisons.
pub trait DiffAlgorithm: Send + Sync {
    /// Computes the ops that transform `base` into `target`.
    fn diff(&self, base: &[&str], target: &[&str]) -> Vec<DiffOp>;
}
