//! Domain errors - contract violations reported by the engines.
//!
//! Degenerate input never produces an error. These variants only describe
//! input a correct host cannot send; they are returned before any state is
//! touched.

use core::fmt;
use thiserror::Error;

use super::{ChangeId, ChangeStatus};

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `AuthorId` cannot be empty.
    EmptyAuthorId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAuthorId => write!(f, "AuthorId cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the live change-tracking engine and patch application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The edit range is inverted.
    #[error("Invalid edit range: from {from} is after to {to}")]
    InvalidRange {
        /// Start of the range.
        from: usize,
        /// End of the range.
        to: usize,
    },

    /// An offset lies past the end of the document.
    #[error("Offset {position} is out of bounds for a document of {len} chars")]
    OutOfBounds {
        /// The offending offset.
        position: usize,
        /// Current document length in chars.
        len: usize,
    },

    /// The change is not tracked: never issued, merged into another record, or cleared.
    #[error("Unknown change: {0}")]
    UnknownChange(ChangeId),

    /// The change already reached the opposite terminal state.
    #[error("Cannot transition change {id} from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// The change being resolved.
        id: ChangeId,
        /// Its current status.
        from: ChangeStatus,
        /// The requested status.
        to: ChangeStatus,
    },

    /// A patch edit does not fit the buffer it is applied to.
    #[error("Patch edit [{from}, {to}) does not fit a buffer of {len} chars")]
    PatchOutOfBounds {
        /// Start of the edit.
        from: usize,
        /// End of the edit.
        to: usize,
        /// Buffer length in chars.
        len: usize,
    },
}
