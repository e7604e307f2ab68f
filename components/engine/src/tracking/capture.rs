//! Recording and remapping of edits against the pending records.
//!
//! The records always describe the document relative to its original text:
//! removing every insertion-like range and putting every deleted text back at
//! its point, in set order, reproduces the original. Each function here keeps
//! that true while shifting the stored ranges through one edit.

use tracing::debug;

use crate::domain::{Author, ChangeKind, ChangeRecord, TextRange};

/// Attribution for an edit that is being tracked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Capture<'a> {
    pub author: &'a Author,
    pub timestamp: i64,
}

const fn map_through_delete(pos: usize, from: usize, to: usize) -> usize {
    if pos <= from {
        pos
    } else if pos >= to {
        pos - (to - from)
    } else {
        from
    }
}

/// Removes the chars `from..to` from a record's inserted text.
fn cut_chars(text: &str, from: usize, to: usize) -> String {
    text.chars()
        .enumerate()
        .filter(|(i, _)| *i < from || *i >= to)
        .map(|(_, c)| c)
        .collect()
}

/// Shifts records through an insertion of `len` chars at `at` placed at set index `slot`.
///
/// Records from `slot` on move with every position `>= at`; earlier records
/// only move positions strictly after `at`, so a deletion point or a range
/// ending at `at` stays in front of the new text.
pub(crate) fn shift_from(records: &mut [ChangeRecord], slot: usize, at: usize, len: usize) {
    for (index, record) in records.iter_mut().enumerate() {
        let shift = |pos: usize| {
            if pos > at || (index >= slot && pos == at) {
                pos + len
            } else {
                pos
            }
        };
        record.range = TextRange::new(shift(record.range.from), shift(record.range.to));
    }
}

/// Applies a deletion of `[from, to)` to the records.
///
/// Insertion-like records overlapping the range are trimmed; an insertion
/// trimmed to nothing is cancelled. When `capture` is set, the original text
/// in the range, together with any pending deleted text strictly inside it,
/// becomes one new Deletion whose set index is returned. `removed` is the
/// document text of the range before the edit.
pub(crate) fn delete_range(
    records: &mut Vec<ChangeRecord>,
    from: usize,
    to: usize,
    removed: &str,
    capture: Option<Capture<'_>>,
) -> Option<usize> {
    let len = to - from;
    let mut covered = vec![false; len];
    let mut absorbed: Vec<(usize, usize, String)> = Vec::new();
    let mut kept: Vec<(usize, ChangeRecord)> = Vec::with_capacity(records.len() + 1);

    for (seq, mut record) in std::mem::take(records).into_iter().enumerate() {
        let TextRange { from: start, to: end } = record.range;
        if record.has_inserted_span() {
            let (lo, hi) = (start.max(from), end.min(to));
            if lo < hi {
                covered[lo - from..hi - from].fill(true);
                let trimmed = cut_chars(record.inserted(), lo - start, hi - start);
                record.inserted_text = Some(trimmed);
            }
            record.range = TextRange::new(
                map_through_delete(start, from, to),
                map_through_delete(end, from, to),
            );
            if record.range.is_empty() {
                match record.kind {
                    ChangeKind::Insertion => {
                        debug!(id = %record.id, "Cancelled pending insertion");
                        continue;
                    }
                    ChangeKind::Replacement if capture.is_some() => {
                        debug!(id = %record.id, "Absorbed erased replacement");
                        absorbed.push((start, seq, record.deleted_text.take().unwrap_or_default()));
                        continue;
                    }
                    ChangeKind::Replacement => {
                        record.kind = ChangeKind::Deletion;
                        record.inserted_text = None;
                    }
                    ChangeKind::Deletion | ChangeKind::Move => {}
                }
            }
        } else {
            if capture.is_some() && from < start && start < to {
                debug!(id = %record.id, "Absorbed pending deletion");
                absorbed.push((start, seq, record.deleted_text.take().unwrap_or_default()));
                continue;
            }
            record.range = TextRange::point(map_through_delete(start, from, to));
        }
        kept.push((start, record));
    }

    let new_index = capture.and_then(|capture| {
        let text = deleted_text(removed, from, &covered, &mut absorbed);
        if text.is_empty() {
            return None;
        }
        let index = kept
            .iter()
            .position(|(original, r)| r.range.from > from || (r.range.from == from && *original > from))
            .unwrap_or(kept.len());
        let record = ChangeRecord::deletion(
            from,
            TextRange::new(from, to),
            text,
            capture.author.clone(),
            capture.timestamp,
        );
        kept.insert(index, (from, record));
        Some(index)
    });

    records.extend(kept.into_iter().map(|(_, record)| record));
    new_index
}

/// Original chars of the range interleaved with absorbed texts, in document order.
fn deleted_text(
    removed: &str,
    from: usize,
    covered: &[bool],
    absorbed: &mut [(usize, usize, String)],
) -> String {
    absorbed.sort_by_key(|(pos, seq, _)| (*pos, *seq));
    let mut absorbed = absorbed.iter().peekable();
    let mut text = String::with_capacity(removed.len());
    for (offset, ch) in removed.chars().enumerate() {
        while let Some((_, _, piece)) = absorbed.next_if(|(pos, _, _)| *pos <= from + offset) {
            text.push_str(piece);
        }
        if !covered[offset] {
            text.push(ch);
        }
    }
    for (_, _, piece) in absorbed {
        text.push_str(piece);
    }
    text
}

/// Applies an insertion of `text` at `at` to the records.
///
/// Inside a pending insertion by the same author the text extends that
/// record; inside anyone else's it splits it. Otherwise a tracked insertion
/// becomes a new record placed after deletions at `at` and before
/// insertions starting there. Returns the set index of the record that now
/// holds the text, if tracked.
pub(crate) fn insert_text(
    records: &mut Vec<ChangeRecord>,
    at: usize,
    text: &str,
    capture: Option<Capture<'_>>,
) -> Option<usize> {
    let len = text.chars().count();

    if let Some(host) = records
        .iter()
        .position(|r| r.has_inserted_span() && r.range.from < at && at < r.range.to)
    {
        shift_from(&mut records[host + 1..], 0, at, len);
        let offset = at - records[host].range.from;

        if let Some(capture) = capture
            && records[host].author.same_as(capture.author)
        {
            let record = &mut records[host];
            let mut inserted = record.inserted().to_string();
            let byte = inserted
                .char_indices()
                .nth(offset)
                .map_or(inserted.len(), |(b, _)| b);
            inserted.insert_str(byte, text);
            record.inserted_text = Some(inserted);
            record.range.to += len;
            record.timestamp = capture.timestamp;
            return Some(host);
        }

        let record = &mut records[host];
        let head: String = record.inserted().chars().take(offset).collect();
        let tail: String = record.inserted().chars().skip(offset).collect();
        let tail_range = TextRange::new(at + len, record.range.to + len);
        record.inserted_text = Some(head);
        record.range.to = at;
        let tail = ChangeRecord::insertion(
            tail_range,
            tail,
            record.author.clone(),
            record.timestamp,
        );
        debug!(id = %record.id, split_at = at, "Split pending insertion");
        records.insert(host + 1, tail);

        return capture.map(|capture| {
            records.insert(host + 1, new_insertion(at, text, len, capture));
            host + 1
        });
    }

    let slot = records
        .iter()
        .position(|r| r.range.from > at || (r.range.from == at && r.has_inserted_span()))
        .unwrap_or(records.len());
    shift_from(records, slot, at, len);
    capture.map(|capture| {
        records.insert(slot, new_insertion(at, text, len, capture));
        slot
    })
}

fn new_insertion(at: usize, text: &str, len: usize, capture: Capture<'_>) -> ChangeRecord {
    ChangeRecord::insertion(
        TextRange::new(at, at + len),
        text,
        capture.author.clone(),
        capture.timestamp,
    )
}

/// Applies a replacement of `[from, to)` by `text`.
///
/// A tracked replacement of original text yields one Replacement record.
pub(crate) fn replace_range(
    records: &mut Vec<ChangeRecord>,
    from: usize,
    to: usize,
    removed: &str,
    text: &str,
    capture: Option<Capture<'_>>,
) -> Option<usize> {
    match delete_range(records, from, to, removed, capture) {
        Some(index) => {
            let len = text.chars().count();
            shift_from(&mut records[index + 1..], 0, from, len);
            let record = &mut records[index];
            record.kind = ChangeKind::Replacement;
            record.range = TextRange::new(from, from + len);
            record.inserted_text = Some(text.to_string());
            Some(index)
        }
        None => insert_text(records, from, text, capture),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str) -> Author {
        Author::human(id, id).unwrap()
    }

    fn capture(author: &Author) -> Option<Capture<'_>> {
        Some(Capture {
            author,
            timestamp: 0,
        })
    }

    fn summary(records: &[ChangeRecord]) -> Vec<(ChangeKind, usize, usize, String, String)> {
        records
            .iter()
            .map(|r| {
                (
                    r.kind,
                    r.range.from,
                    r.range.to,
                    r.deleted().to_string(),
                    r.inserted().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_tracked_insert_and_shift() {
        let ada = author("ada");
        let mut records = Vec::new();
        insert_text(&mut records, 4, "big ", capture(&ada));
        insert_text(&mut records, 0, "A ", capture(&ada));
        assert_eq!(
            summary(&records),
            vec![
                (ChangeKind::Insertion, 0, 2, String::new(), "A ".into()),
                (ChangeKind::Insertion, 6, 10, String::new(), "big ".into()),
            ]
        );
    }

    #[test]
    fn test_delete_inside_own_insertion_trims_it() {
        let ada = author("ada");
        let mut records = Vec::new();
        insert_text(&mut records, 2, "cat", capture(&ada));
        let created = delete_range(&mut records, 3, 4, "a", capture(&ada));
        assert_eq!(created, None);
        assert_eq!(records[0].inserted(), "ct");
        assert_eq!(records[0].range, TextRange::new(2, 4));

        delete_range(&mut records, 2, 4, "ct", capture(&ada));
        assert!(records.is_empty());
    }

    #[test]
    fn test_delete_mixing_inserted_and_original_text() {
        let ada = author("ada");
        // "ab" + inserted "XY" + "cd"
        let mut records = Vec::new();
        insert_text(&mut records, 2, "XY", capture(&ada));
        let created = delete_range(&mut records, 1, 5, "bXYc", capture(&ada));
        assert_eq!(created, Some(0));
        assert_eq!(
            summary(&records),
            vec![(ChangeKind::Deletion, 1, 1, "bc".into(), String::new())]
        );
    }

    #[test]
    fn test_interior_deletion_is_absorbed_in_order() {
        let ada = author("ada");
        // original "abcdef": delete "cd" then delete "bef" around its point.
        let mut records = Vec::new();
        delete_range(&mut records, 2, 4, "cd", capture(&ada));
        delete_range(&mut records, 1, 4, "bef", capture(&ada));
        assert_eq!(
            summary(&records),
            vec![(ChangeKind::Deletion, 1, 1, "bcdef".into(), String::new())]
        );
    }

    #[test]
    fn test_backspace_places_new_deletion_first() {
        let ada = author("ada");
        let mut records = Vec::new();
        delete_range(&mut records, 3, 4, "d", capture(&ada));
        delete_range(&mut records, 2, 3, "c", capture(&ada));
        let texts: Vec<&str> = records.iter().map(ChangeRecord::deleted).collect();
        assert_eq!(texts, vec!["c", "d"]);
        assert!(records.iter().all(|r| r.range == TextRange::point(2)));
    }

    #[test]
    fn test_untracked_delete_turns_erased_replacement_into_deletion() {
        let ada = author("ada");
        let mut records = Vec::new();
        replace_range(&mut records, 0, 3, "old", "new", capture(&ada));
        assert_eq!(records[0].kind, ChangeKind::Replacement);
        delete_range(&mut records, 0, 3, "new", None);
        assert_eq!(
            summary(&records),
            vec![(ChangeKind::Deletion, 0, 0, "old".into(), String::new())]
        );
    }

    #[test]
    fn test_insert_inside_foreign_insertion_splits_it() {
        let ada = author("ada");
        let bob = author("bob");
        let mut records = Vec::new();
        insert_text(&mut records, 0, "hello", capture(&ada));
        let index = insert_text(&mut records, 2, "XX", capture(&bob));
        assert_eq!(index, Some(1));
        assert_eq!(
            summary(&records),
            vec![
                (ChangeKind::Insertion, 0, 2, String::new(), "he".into()),
                (ChangeKind::Insertion, 2, 4, String::new(), "XX".into()),
                (ChangeKind::Insertion, 4, 7, String::new(), "llo".into()),
            ]
        );
        assert_eq!(records[2].author, ada);
    }

    #[test]
    fn test_insert_inside_own_insertion_extends_it() {
        let ada = author("ada");
        let mut records = Vec::new();
        insert_text(&mut records, 0, "helo", capture(&ada));
        insert_text(&mut records, 3, "l", capture(&ada));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].inserted(), "hello");
        assert_eq!(records[0].range, TextRange::new(0, 5));
    }

    #[test]
    fn test_insert_at_deletion_point_goes_after_it() {
        let ada = author("ada");
        let mut records = Vec::new();
        delete_range(&mut records, 2, 4, "xy", capture(&ada));
        insert_text(&mut records, 2, "z", capture(&ada));
        let kinds: Vec<ChangeKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Deletion, ChangeKind::Insertion]);
        assert_eq!(records[0].range, TextRange::point(2));
    }

    #[test]
    fn test_shift_from_respects_slot() {
        let ada = author("ada");
        let mut records = vec![
            ChangeRecord::deletion(3, TextRange::new(3, 4), "a", ada.clone(), 0),
            ChangeRecord::deletion(3, TextRange::new(3, 4), "b", ada, 0),
        ];
        shift_from(&mut records, 1, 3, 2);
        assert_eq!(records[0].range, TextRange::point(3));
        assert_eq!(records[1].range, TextRange::point(5));
    }
}
