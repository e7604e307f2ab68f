//! Edit operations fed to a tracking session.

use serde::{Deserialize, Serialize};

/// Where an edit comes from, which decides how the session treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOrigin {
    /// Typed by the author; tracked while the session is enabled.
    #[default]
    User,
    /// Applied and remapped but never recorded.
    Untracked,
    /// The host echoing a patch this session produced; ignored.
    Review,
    /// A document-level undo; clears all pending changes.
    Undo,
    /// A document-level redo; clears all pending changes.
    Redo,
}

/// Shape of a non-empty edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditShape {
    /// `from == to`, text inserted.
    Insertion,
    /// `from < to`, nothing inserted.
    Deletion,
    /// `from < to`, text inserted in place of the range.
    Replacement,
}

/// Replace the chars in `[from, to)` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOp {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive).
    pub to: usize,
    /// Inserted text.
    #[serde(default)]
    pub insert: String,
    /// Source of the edit.
    #[serde(default)]
    pub origin: EditOrigin,
}

impl EditOp {
    /// Inserts `text` at `at`.
    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }

    /// Deletes `[from, to)`.
    #[must_use]
    pub fn delete(from: usize, to: usize) -> Self {
        Self::replace(from, to, String::new())
    }

    /// Replaces `[from, to)` with `text`.
    #[must_use]
    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: text.into(),
            origin: EditOrigin::User,
        }
    }

    /// Tags the edit with `origin`.
    #[must_use]
    pub const fn with_origin(mut self, origin: EditOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Classifies the edit; `None` for an edit that changes nothing.
    #[must_use]
    pub fn shape(&self) -> Option<EditShape> {
        match (self.from < self.to, self.insert.is_empty()) {
            (true, false) => Some(EditShape::Replacement),
            (true, true) => Some(EditShape::Deletion),
            (false, false) => Some(EditShape::Insertion),
            (false, true) => None,
        }
    }

    /// Number of inserted chars.
    #[must_use]
    pub fn inserted_len(&self) -> usize {
        self.insert.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(EditOp::insert(3, "x").shape(), Some(EditShape::Insertion));
        assert_eq!(EditOp::delete(3, 5).shape(), Some(EditShape::Deletion));
        assert_eq!(EditOp::replace(3, 5, "y").shape(), Some(EditShape::Replacement));
        assert_eq!(EditOp::insert(3, "").shape(), None);
    }

    #[test]
    fn test_origin_defaults_to_user() {
        let op: EditOp = serde_json::from_str(r#"{ "from": 1, "to": 1, "insert": "a" }"#).unwrap();
        assert_eq!(op.origin, EditOrigin::User);
        let op: EditOp = serde_json::from_str(r#"{ "from": 0, "to": 2, "origin": "undo" }"#).unwrap();
        assert_eq!(op.origin, EditOrigin::Undo);
        assert_eq!(op.shape(), Some(EditShape::Deletion));
    }
}
