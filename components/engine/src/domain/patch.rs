//! Concrete text mutations handed back to the host.

use serde::{Deserialize, Serialize};

use super::TrackingError;
use crate::text;

/// Replace the chars in `[from, to)` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatchEdit {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive).
    pub to: usize,
    /// Replacement text.
    pub text: String,
}

impl PatchEdit {
    /// Removes `[from, to)`.
    #[must_use]
    pub fn delete(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            text: String::new(),
        }
    }

    /// Inserts `text` at `at`.
    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            text: text.into(),
        }
    }

    /// Replaces `[from, to)` with `text`.
    #[must_use]
    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            text: text.into(),
        }
    }
}

/// Ordered edits; each one is expressed in the coordinates left by the previous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    edits: Vec<PatchEdit>,
}

impl DocumentPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the edits in application order.
    #[must_use]
    pub fn edits(&self) -> &[PatchEdit] {
        &self.edits
    }

    /// Returns true if applying the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Appends an edit.
    pub fn push(&mut self, edit: PatchEdit) {
        self.edits.push(edit);
    }

    /// Appends every edit of `other`.
    pub fn extend(&mut self, other: Self) {
        self.edits.extend(other.edits);
    }

    /// Applies the edits to `buffer` in order.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::PatchOutOfBounds` if an edit does not fit.
    /// Edits before the failing one stay applied.
    pub fn apply_to(&self, buffer: &mut String) -> Result<(), TrackingError> {
        for edit in &self.edits {
            if !text::replace_chars(buffer, edit.from, edit.to, &edit.text) {
                return Err(TrackingError::PatchOutOfBounds {
                    from: edit.from,
                    to: edit.to,
                    len: text::char_len(buffer),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<PatchEdit>> for DocumentPatch {
    fn from(edits: Vec<PatchEdit>) -> Self {
        Self { edits }
    }
}
