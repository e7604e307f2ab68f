//! Change attribution.

use serde::{Deserialize, Serialize};

use super::AuthorId;

/// Whether a change came from a person or an automated agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorKind {
    /// A human editor.
    Human,
    /// An automated agent, e.g. a language-model suggestion.
    Agent,
}

/// The author a change record is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Opaque author id.
    pub id: AuthorId,
    /// Name shown next to the change.
    pub display_name: String,
    /// Human or agent.
    pub kind: AuthorKind,
}

impl Author {
    /// Creates an author.
    #[must_use]
    pub fn new(id: AuthorId, display_name: impl Into<String>, kind: AuthorKind) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            kind,
        }
    }

    /// Creates a human author.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyAuthorId` if `id` is blank.
    pub fn human(
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, super::ValidationError> {
        Ok(Self::new(AuthorId::new(id)?, display_name, AuthorKind::Human))
    }

    /// Creates an agent author.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyAuthorId` if `id` is blank.
    pub fn agent(
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, super::ValidationError> {
        Ok(Self::new(AuthorId::new(id)?, display_name, AuthorKind::Agent))
    }

    /// The placeholder author used when a caller attributes nothing.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: AuthorId(String::from("anonymous")),
            display_name: String::from("Anonymous"),
            kind: AuthorKind::Human,
        }
    }

    /// Returns true if both authors share the same id.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::anonymous()
    }
}
