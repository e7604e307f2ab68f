//! Accepting and rejecting pending changes.
//!
//! A rejection is applied to the mirror directly, never through
//! `apply_edit`, so reverting a change is not itself recorded. The produced
//! patch arms the echo guard in case the host replays it as a user edit.

use tracing::{debug, info, instrument};

use super::capture;
use super::clock::Clock;
use super::session::{ReviewMark, TrackingSession};
use crate::domain::{ChangeId, ChangeKind, ChangeStatus, DocumentPatch, PatchEdit, TrackingError};
use crate::text;

impl<C: Clock> TrackingSession<C> {
    /// Validates a review status transition.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::InvalidStatusTransition` unless the change is
    /// pending and the target is terminal.
    pub fn validate_status_transition(
        id: ChangeId,
        from: ChangeStatus,
        to: ChangeStatus,
    ) -> Result<(), TrackingError> {
        if matches!(
            (from, to),
            (
                ChangeStatus::Pending,
                ChangeStatus::Accepted | ChangeStatus::Rejected
            )
        ) {
            Ok(())
        } else {
            Err(TrackingError::InvalidStatusTransition { id, from, to })
        }
    }

    /// Finds a pending record, or reports that the request is a repeat.
    fn locate(&self, id: ChangeId, target: ChangeStatus) -> Result<Option<usize>, TrackingError> {
        if let Some(index) = self.changes.position(id) {
            Self::validate_status_transition(id, ChangeStatus::Pending, target)?;
            return Ok(Some(index));
        }
        match self.resolved.get(&id) {
            Some(&status) if status == target => {
                debug!(%id, ?status, "Change already resolved");
                Ok(None)
            }
            Some(&status) => Self::validate_status_transition(id, status, target).map(|()| None),
            None => Err(TrackingError::UnknownChange(id)),
        }
    }

    /// Keeps a change: its text stays as it is and the record is dropped.
    ///
    /// The returned patch is always empty. Accepting an accepted change is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::UnknownChange` for an id the session does not
    /// track and `TrackingError::InvalidStatusTransition` for a rejected one.
    #[instrument(skip(self), fields(id = %id))]
    pub fn accept(&mut self, id: ChangeId) -> Result<DocumentPatch, TrackingError> {
        let Some(index) = self.locate(id, ChangeStatus::Accepted)? else {
            return Ok(DocumentPatch::new());
        };
        let record = self.changes.remove_at(index);
        self.resolved.insert(id, ChangeStatus::Accepted);
        self.mark_review(record.range.from);
        debug!(kind = ?record.kind, "Accepted change");
        Ok(DocumentPatch::new())
    }

    /// Reverts a change in the mirror and returns the edit the host must apply.
    ///
    /// Rejecting a rejected change is a no-op with an empty patch.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::UnknownChange` for an id the session does not
    /// track and `TrackingError::InvalidStatusTransition` for an accepted one.
    #[instrument(skip(self), fields(id = %id))]
    pub fn reject(&mut self, id: ChangeId) -> Result<DocumentPatch, TrackingError> {
        let Some(index) = self.locate(id, ChangeStatus::Rejected)? else {
            return Ok(DocumentPatch::new());
        };
        let edit = self.revert_at(index)?;
        let patch = DocumentPatch::from(vec![edit]);
        self.finish_rejection(&patch);
        Ok(patch)
    }

    /// Keeps every pending change. Calling it on an empty set does nothing.
    #[instrument(skip(self))]
    pub fn accept_all(&mut self) -> DocumentPatch {
        let records = self.changes.take_records();
        if let Some(first) = records.first() {
            self.mark_review(first.range.from);
        }
        for record in &records {
            self.resolved.insert(record.id, ChangeStatus::Accepted);
        }
        info!(accepted = records.len(), "Accepted all changes");
        DocumentPatch::new()
    }

    /// Reverts every pending change.
    ///
    /// Insertions and replacements are removed from the last one backwards,
    /// then deleted texts are restored from the first one forwards. Applied in
    /// order, the patch turns the host document back into the text it had
    /// before the tracked edits.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::PatchOutOfBounds` if a record no longer fits the
    /// mirror, which means the host fed edits the session never saw.
    #[instrument(skip(self))]
    pub fn reject_all(&mut self) -> Result<DocumentPatch, TrackingError> {
        let mut patch = DocumentPatch::new();
        while let Some(index) = self
            .changes
            .records()
            .iter()
            .rposition(|r| r.has_inserted_span())
        {
            patch.push(self.revert_at(index)?);
        }
        while !self.changes.is_empty() {
            patch.push(self.revert_at(0)?);
        }
        if !patch.is_empty() {
            self.finish_rejection(&patch);
        }
        info!(edits = patch.len(), "Rejected all changes");
        Ok(patch)
    }

    /// Reverts the record at `index`, remapping the others around the edit.
    fn revert_at(&mut self, index: usize) -> Result<PatchEdit, TrackingError> {
        let record = &self.changes.records()[index];
        let (id, kind) = (record.id, record.kind);
        let edit = match kind {
            ChangeKind::Insertion => PatchEdit::delete(record.range.from, record.range.to),
            ChangeKind::Deletion => PatchEdit::insert(record.range.from, record.deleted()),
            ChangeKind::Replacement | ChangeKind::Move => {
                PatchEdit::replace(record.range.from, record.range.to, record.deleted())
            }
        };
        if edit.to > text::char_len(&self.document) {
            return Err(TrackingError::PatchOutOfBounds {
                from: edit.from,
                to: edit.to,
                len: text::char_len(&self.document),
            });
        }
        self.commit(edit.from, edit.to, &edit.text)?;

        self.changes.remove_at(index);
        let records = self.changes.records_mut();
        if edit.from < edit.to {
            capture::delete_range(records, edit.from, edit.to, "", None);
        }
        let inserted = text::char_len(&edit.text);
        if inserted > 0 {
            capture::shift_from(records, index, edit.from, inserted);
        }
        self.resolved.insert(id, ChangeStatus::Rejected);
        debug!(%id, ?kind, "Reverted change");
        Ok(edit)
    }

    fn finish_rejection(&mut self, patch: &DocumentPatch) {
        let now = self.now();
        self.echo.arm(patch.edits(), now);
        if let Some(first) = patch.edits().first() {
            self.mark_review(first.from);
        }
    }

    fn mark_review(&mut self, position: usize) {
        self.last_review = Some(ReviewMark {
            position,
            at: self.now(),
        });
    }
}
