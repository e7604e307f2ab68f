//! Myers diff algorithm optimizations.
//!
//! Pre-processing (common affix trimming) shrinks the problem before the
//! O(ND) search; post-processing normalizes the resulting ops.

use crate::diff::DiffOp;

/// Number of leading tokens both sequences share.
pub(crate) fn common_prefix_len(base: &[&str], target: &[&str]) -> usize {
    base.iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Number of trailing tokens both sequences share, not overlapping `prefix`.
pub(crate) fn common_suffix_len(base: &[&str], target: &[&str], prefix: usize) -> usize {
    let limit = base.len().min(target.len()) - prefix;
    base.iter()
        .rev()
        .zip(target.iter().rev())
        .take(limit)
        .take_while(|(a, b)| a == b)
        .count()
}

/// Coalesces consecutive operations.
///
/// Adjacent `Equal` runs are joined, and every maximal run of changes between
/// two `Equal`s becomes exactly one `Delete` followed by one `Insert`, so
/// callers always see a hunk's removed tokens before its added tokens.
pub(crate) fn coalesce_operations(ops: &mut Vec<DiffOp>) {
    if ops.len() < 2 {
        return;
    }

    let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
    let mut deleted: Option<(usize, usize)> = None;
    let mut inserted: Option<(usize, usize)> = None;

    let flush = |out: &mut Vec<DiffOp>,
                 deleted: &mut Option<(usize, usize)>,
                 inserted: &mut Option<(usize, usize)>| {
        if let Some((old_start, old_end)) = deleted.take() {
            out.push(DiffOp::Delete { old_start, old_end });
        }
        if let Some((new_start, new_end)) = inserted.take() {
            out.push(DiffOp::Insert { new_start, new_end });
        }
    };

    for op in ops.drain(..) {
        match op {
            DiffOp::Delete { old_start, old_end } => {
                deleted = Some(deleted.map_or((old_start, old_end), |(s, e)| {
                    (s.min(old_start), e.max(old_end))
                }));
            }
            DiffOp::Insert { new_start, new_end } => {
                inserted = Some(inserted.map_or((new_start, new_end), |(s, e)| {
                    (s.min(new_start), e.max(new_end))
                }));
            }
            DiffOp::Equal {
                old_start,
                old_end,
                new_start,
                new_end,
            } => {
                flush(&mut out, &mut deleted, &mut inserted);
                if let Some(DiffOp::Equal {
                    old_end: prev_old,
                    new_end: prev_new,
                    ..
                }) = out.last_mut()
                    && *prev_old == old_start
                    && *prev_new == new_start
                {
                    *prev_old = old_end;
                    *prev_new = new_end;
                    continue;
                }
                out.push(DiffOp::Equal {
                    old_start,
                    old_end,
                    new_start,
                    new_end,
                });
            }
        }
    }
    flush(&mut out, &mut deleted, &mut inserted);
    *ops = out;
}
