//! Shared helpers for integration tests.
//!
//! [`Editor`] plays the host application: it owns its own text buffer,
//! forwards every keystroke to a tracking session and applies the patches
//! the session hands back, echoing them the way a real editor's change
//! listener would.

#![allow(dead_code)]

use anyhow::Result;
use revise_engine::{Author, DocumentPatch, EditOp, ManualClock, TrackingSession, text};

/// Typing pause that stays inside the coalescing window.
pub const KEYSTROKE_MS: i64 = 80;
/// Pause long enough to start a new change record.
pub const PAUSE_MS: i64 = 5_000;

/// Host editor wired to a tracking session.
pub struct Editor {
    /// The host's own document buffer.
    pub buffer: String,
    /// Session mirroring the buffer.
    pub session: TrackingSession<ManualClock>,
    /// Clock shared with the session.
    pub clock: ManualClock,
}

impl Editor {
    /// Opens `document` with `author` as the local user.
    pub fn open(document: &str, author: Author) -> Self {
        let clock = ManualClock::new(1_000);
        Self {
            buffer: document.to_string(),
            session: TrackingSession::with_clock(document, author, clock.clone()),
            clock,
        }
    }

    /// Applies an edit made by the local user.
    pub fn edit(&mut self, op: EditOp) -> Result<()> {
        self.session.apply_local(op.clone())?;
        anyhow::ensure!(
            text::replace_chars(&mut self.buffer, op.from, op.to, &op.insert),
            "edit does not fit the buffer"
        );
        Ok(())
    }

    /// Applies an edit attributed to `author`.
    pub fn edit_as(&mut self, op: EditOp, author: &Author) -> Result<()> {
        self.session.apply_edit(op.clone(), author)?;
        anyhow::ensure!(
            text::replace_chars(&mut self.buffer, op.from, op.to, &op.insert),
            "edit does not fit the buffer"
        );
        Ok(())
    }

    /// Types `text` one char at a time starting at `at`.
    pub fn type_text(&mut self, at: usize, text: &str) -> Result<()> {
        for (offset, ch) in text.chars().enumerate() {
            self.clock.advance(KEYSTROKE_MS);
            self.edit(EditOp::insert(at + offset, ch.to_string()))?;
        }
        Ok(())
    }

    /// Presses backspace `count` times with the cursor at `cursor`.
    pub fn backspace(&mut self, cursor: usize, count: usize) -> Result<()> {
        for i in 0..count {
            self.clock.advance(KEYSTROKE_MS);
            let at = cursor - i;
            self.edit(EditOp::delete(at - 1, at))?;
        }
        Ok(())
    }

    /// Applies a review patch to the buffer and echoes each edit back to the
    /// session as an ordinary user change.
    pub fn apply_patch(&mut self, patch: &DocumentPatch) -> Result<()> {
        patch.apply_to(&mut self.buffer)?;
        self.clock.advance(1);
        for edit in patch.edits() {
            self.session
                .apply_local(EditOp::replace(edit.from, edit.to, edit.text.clone()))?;
        }
        Ok(())
    }

    /// Starts a new change record on the next edit.
    pub fn pause(&self) {
        self.clock.advance(PAUSE_MS);
    }

    /// Asserts that host buffer and session mirror agree.
    pub fn assert_in_sync(&self) {
        assert_eq!(self.buffer, self.session.document());
    }
}

/// A human author.
pub fn human(id: &str) -> Author {
    Author::human(id, id.to_uppercase()).expect("non-empty id")
}

/// An agent author.
pub fn agent(id: &str) -> Author {
    Author::agent(id, id.to_uppercase()).expect("non-empty id")
}
