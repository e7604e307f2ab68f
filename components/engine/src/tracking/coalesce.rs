//! Merging of rapid same-author records into readable units.
//!
//! Only records that are neighbours in the set are merged, and insertions
//! only when they touch. Text between two records is original text, so a
//! merge across it would lose track of what a rejection has to restore.

use tracing::debug;

use crate::config::TrackingConfig;
use crate::domain::{ChangeKind, ChangeRecord, TextRange};

/// Merges timestamp-consecutive records until no pair qualifies.
///
/// Returns the number of merges performed.
pub(crate) fn coalesce(records: &mut Vec<ChangeRecord>, config: &TrackingConfig) -> usize {
    let mut merges = 0;
    loop {
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&i| records[i].timestamp);

        let Some((earlier, later, merged)) = order.windows(2).find_map(|pair| {
            merge_pair(&records[pair[0]], &records[pair[1]], pair[0], pair[1], config)
                .map(|merged| (pair[0], pair[1], merged))
        }) else {
            return merges;
        };

        debug!(kept = %merged.id, text_len = merged.inserted().len() + merged.deleted().len(), "Coalesced records");
        let (first, second) = (earlier.min(later), earlier.max(later));
        records[first] = merged;
        records.remove(second);
        merges += 1;
    }
}

/// Merges `later` into `earlier` when both are rapid edits of one unit.
///
/// `earlier_index` and `later_index` are the records' positions in the set.
fn merge_pair(
    earlier: &ChangeRecord,
    later: &ChangeRecord,
    earlier_index: usize,
    later_index: usize,
    config: &TrackingConfig,
) -> Option<ChangeRecord> {
    if earlier.kind != later.kind
        || !earlier.author.same_as(&later.author)
        || later.timestamp - earlier.timestamp >= config.coalesce_window_ms
    {
        return None;
    }
    let follows = later_index == earlier_index + 1;
    let precedes = earlier_index == later_index + 1;

    let mut merged = earlier.clone();
    merged.timestamp = later.timestamp;
    match earlier.kind {
        ChangeKind::Insertion => {
            if follows && later.range.from == earlier.range.to {
                merged.range.to = later.range.to;
                merged.inserted_text = Some(format!("{}{}", earlier.inserted(), later.inserted()));
            } else if precedes && later.range.to == earlier.range.from {
                merged.range.from = later.range.from;
                merged.inserted_text = Some(format!("{}{}", later.inserted(), earlier.inserted()));
                merged.original_range = later.original_range;
            } else {
                return None;
            }
        }
        ChangeKind::Deletion => {
            let (earlier_len, later_len) =
                (earlier.deleted().chars().count(), later.deleted().chars().count());
            if earlier_len > config.block_limit
                || later_len > config.block_limit
                || earlier.range.from != later.range.from
            {
                return None;
            }
            let earlier_origin = earlier.original_range.map_or(earlier.range.from, |r| r.from);
            let later_origin = later.original_range.map_or(later.range.from, |r| r.from);
            let single_chars = earlier_len == 1 && later_len == 1;
            if !single_chars && earlier_origin.abs_diff(later_origin) > config.deletion_gap {
                return None;
            }

            let origin = if later_origin < earlier_origin {
                // Backspace: the later text sat before the earlier one.
                if !precedes {
                    return None;
                }
                merged.deleted_text = Some(format!("{}{}", later.deleted(), earlier.deleted()));
                later_origin
            } else {
                if !follows {
                    return None;
                }
                merged.deleted_text = Some(format!("{}{}", earlier.deleted(), later.deleted()));
                earlier_origin
            };
            merged.original_range =
                Some(TextRange::new(origin, origin + earlier_len + later_len));
        }
        ChangeKind::Replacement | ChangeKind::Move => return None,
    }
    Some(merged)
}
