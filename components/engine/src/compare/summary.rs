//! Comparison statistics.

use serde::{Deserialize, Serialize};

use crate::domain::{ChangeKind, ChangeRecord};

/// Counts over the records of one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Insertion records.
    pub insertions: usize,
    /// Deletion records.
    pub deletions: usize,
    /// Replacement records.
    pub replacements: usize,
    /// Move records.
    pub moves: usize,
    /// Records flagged substantive.
    pub substantive: usize,
    /// Records flagged stylistic.
    pub stylistic: usize,
    /// Records at or above the high-confidence cut-off.
    pub high_confidence: usize,
    /// All records.
    pub total: usize,
}

impl DiffSummary {
    /// Tallies `records`, counting confidence `>= high_confidence` as high.
    #[must_use]
    pub fn from_records(records: &[ChangeRecord], high_confidence: f64) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.kind {
                ChangeKind::Insertion => summary.insertions += 1,
                ChangeKind::Deletion => summary.deletions += 1,
                ChangeKind::Replacement => summary.replacements += 1,
                ChangeKind::Move => summary.moves += 1,
            }
            if let Some(class) = record.classification {
                summary.substantive += usize::from(class.is_substantive);
                summary.stylistic += usize::from(class.is_stylistic);
            }
            if record.confidence >= high_confidence {
                summary.high_confidence += 1;
            }
        }
        summary
    }

    /// Returns true if the snapshots did not differ.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}
