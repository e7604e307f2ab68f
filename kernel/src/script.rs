//! Replayable edit scripts.
//!
//! A script is a JSON document holding the initial text, the session author
//! and a list of timed steps:
//!
//! ```json
//! {
//!   "document": "The fox.",
//!   "author": { "id": "alice", "name": "Alice" },
//!   "steps": [
//!     { "action": "edit", "from": 4, "to": 4, "insert": "quick " },
//!     { "action": "wait", "ms": 5000 },
//!     { "action": "reject", "index": 0 }
//!   ]
//! }
//! ```
//!
//! Replays run on a [`ManualClock`], so coalescing depends only on the
//! `wait` steps. The replay keeps its own host buffer, applies every edit
//! and every review patch to it, and checks at the end that it matches the
//! session mirror.

use anyhow::{Context, Result, anyhow, bail, ensure};
use clap::ValueEnum;
use revise_engine::{
    Author, AuthorId, AuthorKind, ChangeRecord, DocumentPatch, EditOp, EditOrigin, ManualClock,
    TrackingConfig, TrackingSession, text,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::infrastructure::audit::{AuditEvent, log_audit};

/// A recorded editing session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReplayScript {
    /// Text before the first step.
    pub document: String,
    /// Author of edits that name none.
    pub author: AuthorSpec,
    /// Initial clock reading in milliseconds.
    #[serde(default)]
    pub start_ms: i64,
    /// Steps in execution order.
    pub steps: Vec<ScriptStep>,
}

/// Author as written in a script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorSpec {
    /// Author id; must not be blank.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `Human` or `Agent`.
    #[serde(default = "default_author_kind")]
    pub kind: AuthorKind,
}

impl AuthorSpec {
    /// Converts to an engine author.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank.
    pub fn to_author(&self) -> Result<Author> {
        let id = AuthorId::new(self.id.clone())
            .with_context(|| format!("Invalid author '{}'", self.name))?;
        Ok(Author::new(id, self.name.clone(), self.kind))
    }
}

const fn default_author_kind() -> AuthorKind {
    AuthorKind::Human
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Replace `[from, to)` with `insert`.
    Edit {
        /// Start offset (inclusive).
        from: usize,
        /// End offset (exclusive).
        to: usize,
        /// Inserted text.
        #[serde(default)]
        insert: String,
        /// Source of the edit.
        #[serde(default)]
        origin: EditOrigin,
        /// Author of this edit, if not the script author.
        #[serde(default)]
        author: Option<AuthorSpec>,
    },
    /// Advance the clock.
    Wait {
        /// Milliseconds to advance.
        ms: i64,
    },
    /// Accept the pending change at `index` in document order.
    Accept {
        /// Index into the pending changes.
        index: usize,
    },
    /// Reject the pending change at `index` in document order.
    Reject {
        /// Index into the pending changes.
        index: usize,
    },
    /// Accept every pending change.
    AcceptAll,
    /// Reject every pending change.
    RejectAll,
    /// Turn tracking on or off.
    SetEnabled {
        /// New tracking state.
        enabled: bool,
    },
}

/// Review applied after the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Finish {
    /// Leave pending changes as they are.
    #[default]
    None,
    /// Accept everything still pending.
    AcceptAll,
    /// Reject everything still pending.
    RejectAll,
}

/// State after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    /// Final document text.
    pub document: String,
    /// Changes still pending, in document order.
    pub pending: Vec<ChangeRecord>,
    /// Non-empty patches produced by review steps, in order.
    pub patches: Vec<DocumentPatch>,
    /// Session edit counter.
    pub version: u64,
}

/// Runs `script` through a fresh tracking session.
///
/// # Errors
///
/// Returns an error naming the failing step if an edit is out of bounds, a
/// review step names a change that does not exist or makes an invalid status
/// transition, or the host buffer drifts from the session mirror.
pub fn replay(script: &ReplayScript, config: &TrackingConfig, finish: Finish) -> Result<ReplayOutcome> {
    let clock = ManualClock::new(script.start_ms);
    let author = script.author.to_author()?;
    let mut session = TrackingSession::with_clock(script.document.clone(), author, clock.clone())
        .with_config(config.clone());
    let mut host = script.document.clone();
    let mut patches = Vec::new();

    for (i, step) in script.steps.iter().enumerate() {
        let patch = run_step(&mut session, &clock, &mut host, step)
            .with_context(|| format!("Step {i} failed"))?;
        if let Some(patch) = patch {
            record_patch(&mut host, &mut patches, patch)?;
        }
    }

    let patch = match finish {
        Finish::None => None,
        Finish::AcceptAll => Some(accept_all(&mut session)),
        Finish::RejectAll => Some(reject_all(&mut session)?),
    };
    if let Some(patch) = patch {
        record_patch(&mut host, &mut patches, patch)?;
    }

    ensure!(
        host == session.document(),
        "Host buffer diverged from the session mirror"
    );
    info!(
        steps = script.steps.len(),
        pending = session.changes().len(),
        patches = patches.len(),
        "Replay finished"
    );
    Ok(ReplayOutcome {
        document: host,
        pending: session.current_changes(),
        patches,
        version: session.version(),
    })
}

fn run_step(
    session: &mut TrackingSession<ManualClock>,
    clock: &ManualClock,
    host: &mut String,
    step: &ScriptStep,
) -> Result<Option<DocumentPatch>> {
    debug!(?step, "Replaying step");
    match step {
        ScriptStep::Edit {
            from,
            to,
            insert,
            origin,
            author,
        } => {
            let op = EditOp {
                from: *from,
                to: *to,
                insert: insert.clone(),
                origin: *origin,
            };
            match author {
                Some(spec) => session.apply_edit(op, &spec.to_author()?)?,
                None => session.apply_local(op)?,
            }
            // Review echoes are already part of the host buffer.
            if *origin != EditOrigin::Review && !text::replace_chars(host, *from, *to, insert) {
                bail!("Edit {from}..{to} does not fit the host buffer");
            }
            Ok(None)
        }
        ScriptStep::Wait { ms } => {
            clock.advance(*ms);
            Ok(None)
        }
        ScriptStep::Accept { index } => {
            let (id, author) = pending_at(session, *index)?;
            let patch = session.accept(id)?;
            log_audit(&AuditEvent::ChangeAccepted {
                id: id.to_string(),
                author,
            });
            Ok(Some(patch))
        }
        ScriptStep::Reject { index } => {
            let (id, author) = pending_at(session, *index)?;
            let patch = session.reject(id)?;
            log_audit(&AuditEvent::ChangeRejected {
                id: id.to_string(),
                author,
            });
            Ok(Some(patch))
        }
        ScriptStep::AcceptAll => Ok(Some(accept_all(session))),
        ScriptStep::RejectAll => Ok(Some(reject_all(session)?)),
        ScriptStep::SetEnabled { enabled } => {
            session.set_enabled(*enabled);
            Ok(None)
        }
    }
}

fn pending_at(
    session: &TrackingSession<ManualClock>,
    index: usize,
) -> Result<(revise_engine::ChangeId, String)> {
    let record = session
        .changes()
        .records()
        .get(index)
        .ok_or_else(|| anyhow!("No pending change at index {index}"))?;
    Ok((record.id, record.author.id.to_string()))
}

fn accept_all(session: &mut TrackingSession<ManualClock>) -> DocumentPatch {
    let count = session.changes().len();
    let patch = session.accept_all();
    log_audit(&AuditEvent::BulkAccepted { count });
    patch
}

fn reject_all(session: &mut TrackingSession<ManualClock>) -> Result<DocumentPatch> {
    let count = session.changes().len();
    let patch = session.reject_all()?;
    log_audit(&AuditEvent::BulkRejected { count });
    Ok(patch)
}

fn record_patch(
    host: &mut String,
    patches: &mut Vec<DocumentPatch>,
    patch: DocumentPatch,
) -> Result<()> {
    if patch.is_empty() {
        return Ok(());
    }
    patch
        .apply_to(host)
        .context("Review patch does not fit the host buffer")?;
    patches.push(patch);
    Ok(())
}
