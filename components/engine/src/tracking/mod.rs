//! Live change-tracking engine.
//!
//! A [`TrackingSession`] consumes a stream of [`EditOp`]s, records each
//! tracked edit as a pending [`ChangeRecord`](crate::domain::ChangeRecord),
//! keeps every stored range valid as later edits shift it, and can accept or
//! reject changes by handing back a [`DocumentPatch`](crate::domain::DocumentPatch).
//!
//! This module contains:
//! - `clock`: timestamp sources shared by all records of a session
//! - `edit`: the edit operation and its origin tags
//! - `capture`: recording and remapping of one edit
//! - `coalesce`: merging rapid same-author edits
//! - `review`: accept/reject and their status transitions

mod capture;
pub mod clock;
mod coalesce;
pub mod edit;
mod mapping;
mod review;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use edit::{EditOp, EditOrigin, EditShape};
pub use session::{ReviewMark, TrackingSession};
