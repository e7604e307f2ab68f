//! The live tracking session.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::capture::{self, Capture};
use super::clock::{Clock, SystemClock};
use super::coalesce;
use super::edit::{EditOp, EditOrigin, EditShape};
use super::mapping::{PositionLog, StepMap};
use crate::config::TrackingConfig;
use crate::domain::{
    Author, AuthorId, ChangeId, ChangeRecord, ChangeSet, ChangeStatus, PatchEdit, TrackingError,
};
use crate::text;

/// Where and when the latest accept or reject happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMark {
    /// Document offset of the resolved change.
    pub position: usize,
    /// Session clock time of the review.
    pub at: i64,
}

/// Patch edits the host is expected to echo back after a rejection.
#[derive(Debug, Clone, Default)]
pub(super) struct EchoGuard {
    expected: VecDeque<PatchEdit>,
    armed_at: i64,
}

impl EchoGuard {
    pub(super) fn arm(&mut self, edits: &[PatchEdit], now: i64) {
        self.expected = edits.iter().cloned().collect();
        self.armed_at = now;
    }

    /// Consumes the next expected edit if `op` repeats it within `cooldown_ms`.
    fn consume(&mut self, op: &EditOp, now: i64, cooldown_ms: i64) -> bool {
        let matches = now - self.armed_at <= cooldown_ms
            && self
                .expected
                .front()
                .is_some_and(|edit| edit.from == op.from && edit.to == op.to && edit.text == op.insert);
        if matches {
            self.expected.pop_front();
        } else {
            self.expected.clear();
        }
        matches
    }

    pub(super) fn clear(&mut self) {
        self.expected.clear();
    }
}

/// Records a stream of edits against one document as pending changes.
///
/// The session keeps its own mirror of the document so it can slice deleted
/// text and validate offsets. All operations must be serialized by the
/// caller; a session is one editing context.
#[derive(Debug)]
pub struct TrackingSession<C: Clock = SystemClock> {
    pub(super) document: String,
    pub(super) enabled: bool,
    pub(super) author: Author,
    pub(super) changes: ChangeSet,
    pub(super) resolved: HashMap<ChangeId, ChangeStatus>,
    pub(super) log: PositionLog,
    pub(super) echo: EchoGuard,
    pub(super) last_review: Option<ReviewMark>,
    pub(super) config: TrackingConfig,
    pub(super) clock: C,
}

impl TrackingSession<SystemClock> {
    /// Starts an enabled session over `document` using wall-clock time.
    #[must_use]
    pub fn new(document: impl Into<String>, author: Author) -> Self {
        Self::with_clock(document, author, SystemClock)
    }
}

impl<C: Clock> TrackingSession<C> {
    /// Starts an enabled session with an explicit clock.
    #[must_use]
    pub fn with_clock(document: impl Into<String>, author: Author, clock: C) -> Self {
        let config = TrackingConfig::default();
        Self {
            document: document.into(),
            enabled: true,
            author,
            changes: ChangeSet::new(),
            resolved: HashMap::new(),
            log: PositionLog::new(config.position_log_capacity),
            echo: EchoGuard::default(),
            last_review: None,
            config,
            clock,
        }
    }

    /// Replaces the thresholds.
    #[must_use]
    pub fn with_config(mut self, config: TrackingConfig) -> Self {
        self.log = PositionLog::new(config.position_log_capacity);
        self.log.reset(self.changes.version());
        self.config = config;
        self
    }

    /// The mirrored document text.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The pending records.
    #[must_use]
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// A snapshot of the pending records for rendering.
    #[must_use]
    pub fn current_changes(&self) -> Vec<ChangeRecord> {
        self.changes.records().to_vec()
    }

    /// The edit counter; bumped by every applied edit.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.changes.version()
    }

    /// The active thresholds.
    #[must_use]
    pub const fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Returns true while user edits are recorded.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns recording on or off; disabled sessions still remap.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The author used by [`Self::apply_local`].
    #[must_use]
    pub const fn author(&self) -> &Author {
        &self.author
    }

    /// Changes the session author.
    pub fn set_author(&mut self, author: Author) {
        self.author = author;
    }

    /// Position and time of the latest accept or reject.
    #[must_use]
    pub const fn last_review(&self) -> Option<ReviewMark> {
        self.last_review
    }

    /// Pending records attributed to `author`.
    #[must_use]
    pub fn changes_by(&self, author: &AuthorId) -> Vec<&ChangeRecord> {
        self.changes.iter().filter(|r| &r.author.id == author).collect()
    }

    /// The pending record covering `pos`, or the deletion anchored there.
    #[must_use]
    pub fn change_at(&self, pos: usize) -> Option<&ChangeRecord> {
        self.changes
            .iter()
            .find(|r| r.range.contains(pos) || (r.range.is_empty() && r.range.from == pos))
    }

    /// Status of a change: `Pending` while in the set, then its resolution.
    #[must_use]
    pub fn resolved_status(&self, id: ChangeId) -> Option<ChangeStatus> {
        if self.changes.get(id).is_some() {
            return Some(ChangeStatus::Pending);
        }
        self.resolved.get(&id).copied()
    }

    /// Maps an offset taken at `since_version` to the current document.
    ///
    /// Returns `None` once the position log no longer covers that version.
    #[must_use]
    pub fn map_position(&self, pos: usize, since_version: u64) -> Option<usize> {
        self.log.map(pos, since_version, self.changes.version())
    }

    /// Applies an edit attributed to the session author.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_edit`].
    pub fn apply_local(&mut self, op: EditOp) -> Result<(), TrackingError> {
        let author = self.author.clone();
        self.apply_edit(op, &author)
    }

    /// Applies one edit to the mirror and the pending records.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::InvalidRange` if `op.from > op.to` and
    /// `TrackingError::OutOfBounds` if `op.to` lies past the document end.
    /// The session is unchanged on error.
    #[instrument(skip(self, op, author), fields(from = op.from, to = op.to, origin = ?op.origin))]
    pub fn apply_edit(&mut self, op: EditOp, author: &Author) -> Result<(), TrackingError> {
        let now = self.clock.now_millis();
        if op.origin == EditOrigin::Review {
            self.echo.consume(&op, now, i64::MAX);
            debug!("Ignored review echo");
            return Ok(());
        }
        // Echoes are matched before bounds checks: the mirror already holds
        // the patched text, so a patch edit may lie past its end.
        if op.origin == EditOrigin::User
            && self.echo.consume(&op, now, self.config.review_cooldown_ms)
        {
            debug!("Consumed echo of a review patch");
            return Ok(());
        }
        self.validate_range(op.from, op.to)?;
        let Some(shape) = op.shape() else {
            return Ok(());
        };

        let removed = text::slice_chars(&self.document, op.from, op.to).to_string();
        self.commit(op.from, op.to, &op.insert)?;

        if matches!(op.origin, EditOrigin::Undo | EditOrigin::Redo) {
            self.clear_for_history_jump();
            return Ok(());
        }

        let tracked = op.origin == EditOrigin::User && self.enabled;
        let capture = tracked.then_some(Capture {
            author,
            timestamp: now,
        });
        let records = self.changes.records_mut();
        let touched = match shape {
            EditShape::Insertion => capture::insert_text(records, op.from, &op.insert, capture),
            EditShape::Deletion => capture::delete_range(records, op.from, op.to, &removed, capture),
            EditShape::Replacement => {
                capture::replace_range(records, op.from, op.to, &removed, &op.insert, capture)
            }
        };
        if tracked {
            coalesce::coalesce(records, &self.config);
        }
        debug!(?shape, tracked, touched = ?touched, pending = self.changes.len(), "Applied edit");
        Ok(())
    }

    /// Drops every pending record without touching the document.
    pub fn clear(&mut self) {
        let dropped = self.changes.take_records().len();
        debug!(dropped, "Cleared pending changes");
    }

    /// Signals that the host performed an undo or redo on its own.
    ///
    /// Positions cannot be trusted across a history jump, so all pending
    /// records are dropped and the position log is reset.
    pub fn notify_external_undo(&mut self) {
        self.clear_for_history_jump();
    }

    fn clear_for_history_jump(&mut self) {
        self.clear();
        self.echo.clear();
        self.log.reset(self.changes.version());
    }

    pub(super) fn validate_range(&self, from: usize, to: usize) -> Result<(), TrackingError> {
        if from > to {
            return Err(TrackingError::InvalidRange { from, to });
        }
        let len = text::char_len(&self.document);
        if to > len {
            return Err(TrackingError::OutOfBounds { position: to, len });
        }
        Ok(())
    }

    /// Applies a raw edit to the mirror and logs its position shift.
    pub(super) fn commit(&mut self, from: usize, to: usize, insert: &str) -> Result<(), TrackingError> {
        if !text::replace_chars(&mut self.document, from, to, insert) {
            return Err(TrackingError::OutOfBounds {
                position: to,
                len: text::char_len(&self.document),
            });
        }
        let version = self.changes.bump_version();
        self.log.record(
            version,
            StepMap {
                from,
                deleted: to - from,
                inserted: text::char_len(insert),
            },
        );
        Ok(())
    }

    pub(super) fn now(&self) -> i64 {
        self.clock.now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeKind, TextRange};
    use crate::tracking::ManualClock;

    fn ada() -> Author {
        Author::human("ada", "Ada").unwrap()
    }

    fn session(document: &str) -> (TrackingSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        (
            TrackingSession::with_clock(document, ada(), clock.clone()),
            clock,
        )
    }

    fn type_text(session: &mut TrackingSession<ManualClock>, at: usize, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            session
                .apply_local(EditOp::insert(at + offset, ch.to_string()))
                .unwrap();
        }
    }

    #[test]
    fn test_typing_coalesces_into_one_insertion() {
        let (mut session, _) = session("I saw a .");
        type_text(&mut session, 8, "cat");
        assert_eq!(session.document(), "I saw a cat.");
        let changes = session.current_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Insertion);
        assert_eq!(changes[0].inserted(), "cat");
        assert_eq!(changes[0].range, TextRange::new(8, 11));
    }

    #[test]
    fn test_backspacing_own_text_leaves_nothing() {
        let (mut session, _) = session("I saw a .");
        type_text(&mut session, 8, "cat");
        for at in (8..11).rev() {
            session.apply_local(EditOp::delete(at, at + 1)).unwrap();
        }
        assert_eq!(session.document(), "I saw a .");
        assert!(session.changes().is_empty());
    }

    #[test]
    fn test_backspacing_original_text_coalesces_backwards() {
        let (mut session, _) = session("abcdef");
        for at in (2..5).rev() {
            session.apply_local(EditOp::delete(at, at + 1)).unwrap();
        }
        assert_eq!(session.document(), "abf");
        let changes = session.current_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].deleted(), "cde");
        assert_eq!(changes[0].range, TextRange::point(2));
    }

    #[test]
    fn test_slow_edits_stay_separate() {
        let (mut session, clock) = session("abcd");
        session.apply_local(EditOp::delete(3, 4)).unwrap();
        clock.advance(5_000);
        session.apply_local(EditOp::delete(2, 3)).unwrap();
        let texts: Vec<String> = session
            .current_changes()
            .iter()
            .map(|r| r.deleted().to_string())
            .collect();
        assert_eq!(texts, vec!["c", "d"]);
    }

    #[test]
    fn test_replacement_edit() {
        let (mut session, _) = session("hello world");
        session.apply_local(EditOp::replace(0, 5, "howdy")).unwrap();
        let changes = session.current_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Replacement);
        assert_eq!(changes[0].deleted(), "hello");
        assert_eq!(changes[0].inserted(), "howdy");
        assert_eq!(changes[0].original_range, Some(TextRange::new(0, 5)));
    }

    #[test]
    fn test_invalid_edits_leave_session_untouched() {
        let (mut session, _) = session("short");
        let inverted = EditOp {
            from: 4,
            to: 2,
            insert: String::new(),
            origin: EditOrigin::User,
        };
        assert_eq!(
            session.apply_local(inverted),
            Err(TrackingError::InvalidRange { from: 4, to: 2 })
        );
        assert_eq!(
            session.apply_local(EditOp::delete(0, 40)),
            Err(TrackingError::OutOfBounds {
                position: 40,
                len: 5
            })
        );
        assert_eq!(session.document(), "short");
        assert_eq!(session.version(), 0);
        assert!(session.changes().is_empty());
    }

    #[test]
    fn test_empty_edit_is_a_no_op() {
        let (mut session, _) = session("text");
        session.apply_local(EditOp::insert(2, "")).unwrap();
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn test_disabled_session_only_remaps() {
        let (mut session, _) = session("one two");
        session.apply_local(EditOp::insert(4, "big ")).unwrap();
        session.set_enabled(false);
        assert!(!session.is_enabled());
        session.apply_local(EditOp::insert(0, "so ")).unwrap();
        let changes = session.current_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].range, TextRange::new(7, 11));
        assert_eq!(session.document(), "so one big two");
    }

    #[test]
    fn test_untracked_edit_inside_insertion_splits_it() {
        let (mut session, _) = session("");
        session.apply_local(EditOp::insert(0, "hello")).unwrap();
        session
            .apply_local(EditOp::insert(2, "--").with_origin(EditOrigin::Untracked))
            .unwrap();
        let texts: Vec<String> = session
            .current_changes()
            .iter()
            .map(|r| r.inserted().to_string())
            .collect();
        assert_eq!(texts, vec!["he", "llo"]);
        assert_eq!(session.document(), "he--llo");
    }

    #[test]
    fn test_undo_clears_changes() {
        let (mut session, _) = session("text");
        session.apply_local(EditOp::insert(4, "!")).unwrap();
        session
            .apply_local(EditOp::delete(4, 5).with_origin(EditOrigin::Undo))
            .unwrap();
        assert_eq!(session.document(), "text");
        assert!(session.changes().is_empty());
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_map_position() {
        let (mut session, _) = session("0123456789");
        let since = session.version();
        session.apply_local(EditOp::insert(0, "abc")).unwrap();
        session.apply_local(EditOp::delete(8, 10)).unwrap();
        assert_eq!(session.map_position(9, since), Some(10));
        assert_eq!(session.map_position(1, since), Some(4));

        session.notify_external_undo();
        assert_eq!(session.map_position(9, since), None);
        assert_eq!(session.map_position(9, session.version()), Some(9));
    }

    #[test]
    fn test_lookup_by_author_and_position() {
        let (mut session, _) = session("base text");
        let bob = Author::agent("bob", "Bob").unwrap();
        session.apply_local(EditOp::insert(0, "A ")).unwrap();
        session.apply_edit(EditOp::delete(6, 11), &bob).unwrap();

        assert_eq!(session.changes_by(&bob.id).len(), 1);
        assert_eq!(session.changes_by(&ada().id).len(), 1);
        assert_eq!(
            session.change_at(1).map(|r| r.kind),
            Some(ChangeKind::Insertion)
        );
        assert_eq!(
            session.change_at(6).map(|r| r.kind),
            Some(ChangeKind::Deletion)
        );
        assert!(session.change_at(3).is_none());
    }

    #[test]
    fn test_review_origin_is_ignored() {
        let (mut session, _) = session("text");
        session
            .apply_local(EditOp::insert(0, "x").with_origin(EditOrigin::Review))
            .unwrap();
        assert_eq!(session.document(), "text");
        assert_eq!(session.version(), 0);
    }
}
