//! Change-record model shared by the static and live engines.
//!
//! This module contains:
//! - Identifiers and author attribution
//! - `ChangeRecord` and its kind/status/classification vocabulary
//! - `ChangeSet`, the ordered collection the live engine mutates
//! - `DocumentPatch`, the concrete text mutations a host applies
//! - Error types for contract violations

pub mod author;
pub mod change;
pub mod change_set;
pub mod errors;
pub mod ids;
pub mod patch;

pub use author::{Author, AuthorKind};
pub use change::{ChangeKind, ChangeRecord, ChangeStatus, Classification, TextRange};
pub use change_set::ChangeSet;
pub use errors::{TrackingError, ValidationError};
pub use ids::{AuthorId, ChangeId};
pub use patch::{DocumentPatch, PatchEdit};
