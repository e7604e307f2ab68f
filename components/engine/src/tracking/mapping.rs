//! Position mapping through applied edits.

use std::collections::VecDeque;

/// The position shift of one applied edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepMap {
    pub from: usize,
    pub deleted: usize,
    pub inserted: usize,
}

impl StepMap {
    /// Maps a position from before the edit to after it.
    ///
    /// Positions inside the deleted range collapse to its start; a position
    /// at the start of an insertion stays in front of it.
    pub(crate) const fn map(&self, pos: usize) -> usize {
        if pos <= self.from {
            pos
        } else if pos >= self.from + self.deleted {
            pos - self.deleted + self.inserted
        } else {
            self.from
        }
    }
}

/// Bounded history of steps keyed by the version they produced.
#[derive(Debug, Clone)]
pub(crate) struct PositionLog {
    steps: VecDeque<(u64, StepMap)>,
    capacity: usize,
    /// Oldest version positions can still be mapped from.
    floor: u64,
}

impl PositionLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            steps: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            floor: 0,
        }
    }

    pub(crate) fn record(&mut self, version: u64, step: StepMap) {
        self.steps.push_back((version, step));
        while self.steps.len() > self.capacity {
            if let Some((dropped, _)) = self.steps.pop_front() {
                self.floor = dropped;
            }
        }
        if self.capacity == 0 {
            self.floor = version;
        }
    }

    /// Forgets every step; only `version` itself stays mappable.
    pub(crate) fn reset(&mut self, version: u64) {
        self.steps.clear();
        self.floor = version;
    }

    /// Maps `pos` from `since` to `current`, or `None` if the log no longer reaches back.
    pub(crate) fn map(&self, pos: usize, since: u64, current: u64) -> Option<usize> {
        if since < self.floor || since > current {
            return None;
        }
        Some(
            self.steps
                .iter()
                .filter(|(version, _)| *version > since)
                .fold(pos, |pos, (_, step)| step.map(pos)),
        )
    }
}
