//! Ordered collection of change records.

use serde::{Deserialize, Serialize};

use super::{ChangeId, ChangeKind, ChangeRecord};

/// Change records sorted by `range.from`, plus an edit counter.
///
/// Among records at the same position the stored order is document order:
/// a deletion stored before another at the same point had its text located
/// before the other's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    records: Vec<ChangeRecord>,
    version: u64,
}

impl ChangeSet {
    /// Creates an empty set at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from unsorted records, sorting them by position.
    #[must_use]
    pub fn from_records(mut records: Vec<ChangeRecord>) -> Self {
        records.sort_by_key(|r| r.range.from);
        Self {
            records,
            version: 0,
        }
    }

    /// Returns the records in position order.
    #[must_use]
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The monotonically increasing edit counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: ChangeId) -> Option<&ChangeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns the index of a record by id.
    #[must_use]
    pub fn position(&self, id: ChangeId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Counts records of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: ChangeKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Iterates over the records in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    /// Consumes the set, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<ChangeRecord> {
        &mut self.records
    }

    pub(crate) fn bump_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> ChangeRecord {
        self.records.remove(index)
    }

    pub(crate) fn take_records(&mut self) -> Vec<ChangeRecord> {
        std::mem::take(&mut self.records)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
