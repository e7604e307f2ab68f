//! Myers diff algorithm.
use super::optimization::{coalesce_operations, common_prefix_len, common_suffix_len};
use crate::diff::{DiffAlgorithm, DiffOp};

/// Myers diff algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersDiff;

impl MyersDiff {
    /// Creates new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiffAlgorithm for MyersDiff {
    fn diff(&self, base: &[&str], target: &[&str]) -> Vec<DiffOp> {
        if base.is_empty() && target.is_empty() {
            return Vec::new();
        }
        if base.is_empty() {
            return vec![DiffOp::Insert {
                new_start: 0,
                new_end: target.len(),
            }];
        }
        if target.is_empty() {
            return vec![DiffOp::Delete {
                old_start: 0,
                old_end: base.len(),
            }];
        }

        let prefix = common_prefix_len(base, target);
        let suffix = common_suffix_len(base, target, prefix);
        let base_mid = &base[prefix..base.len() - suffix];
        let target_mid = &target[prefix..target.len() - suffix];

        let mut ops = Vec::new();
        if prefix > 0 {
            ops.push(DiffOp::Equal {
                old_start: 0,
                old_end: prefix,
                new_start: 0,
                new_end: prefix,
            });
        }
        ops.extend(convert_ses_to_diff_ops(
            &compute_ses(base_mid, target_mid),
            prefix,
            prefix,
        ));
        if suffix > 0 {
            ops.push(DiffOp::Equal {
                old_start: base.len() - suffix,
                old_end: base.len(),
                new_start: target.len() - suffix,
                new_end: target.len(),
            });
        }
        coalesce_operations(&mut ops);
        ops
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditStep {
    Insert,
    Delete,
    Keep,
}

/// Computes the shortest edit script.
///
/// `trace[d]` holds the furthest-reaching x for diagonals `-(d+1)..=d+1`
/// as they stood before round `d`.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn compute_ses(base: &[&str], target: &[&str]) -> Vec<EditStep> {
    let (n, m) = (base.len(), target.len());
    if n == 0 {
        return vec![EditStep::Insert; m];
    }
    if m == 0 {
        return vec![EditStep::Delete; n];
    }
    let max_d = (n + m) as isize;
    let offset = max_d + 1;
    let (n_i, m_i) = (n as isize, m as isize);
    let mut v: Vec<isize> = vec![0; (2 * max_d + 3) as usize];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    'outer: for d in 0..=max_d {
        let lo = (offset - d - 1) as usize;
        let hi = (offset + d + 1) as usize;
        trace.push(v[lo..=hi].to_vec());

        let mut k = -d;
        while k <= d {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n_i && y < m_i && base[x as usize] == target[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n_i && y >= m_i {
                break 'outer;
            }
            k += 2;
        }
    }
    backtrack(&trace, n, m)
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn backtrack(trace: &[Vec<isize>], n: usize, m: usize) -> Vec<EditStep> {
    let mut edits = Vec::with_capacity(n + m);
    let (mut x, mut y) = (n as isize, m as isize);
    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let at = |k: isize| v[(k + d + 1) as usize];
        let k = x - y;
        let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = at(prev_k);
        let prev_y = prev_x - prev_k;
        while x > prev_x && y > prev_y {
            edits.push(EditStep::Keep);
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                edits.push(EditStep::Insert);
            } else {
                edits.push(EditStep::Delete);
            }
            x = prev_x;
            y = prev_y;
        }
    }
    edits.reverse();
    edits
}

/// Folds an edit script into ranged ops, offsetting indices by the trimmed prefix.
pub(crate) fn convert_ses_to_diff_ops(
    ses: &[EditStep],
    base_offset: usize,
    target_offset: usize,
) -> Vec<DiffOp> {
    let (mut ops, mut bi, mut ti) = (Vec::<DiffOp>::new(), base_offset, target_offset);
    for step in ses {
        match step {
            EditStep::Keep => {
                match ops.last_mut() {
                    Some(DiffOp::Equal {
                        old_end, new_end, ..
                    }) => {
                        *old_end = bi + 1;
                        *new_end = ti + 1;
                    }
                    _ => ops.push(DiffOp::Equal {
                        old_start: bi,
                        old_end: bi + 1,
                        new_start: ti,
                        new_end: ti + 1,
                    }),
                }
                bi += 1;
                ti += 1;
            }
            EditStep::Delete => {
                match ops.last_mut() {
                    Some(DiffOp::Delete { old_end, .. }) => *old_end = bi + 1,
                    _ => ops.push(DiffOp::Delete {
                        old_start: bi,
                        old_end: bi + 1,
                    }),
                }
                bi += 1;
            }
            EditStep::Insert => {
                match ops.last_mut() {
                    Some(DiffOp::Insert { new_end, .. }) => *new_end = ti + 1,
                    _ => ops.push(DiffOp::Insert {
                        new_start: ti,
                        new_end: ti + 1,
                    }),
                }
                ti += 1;
            }
        }
    }
    ops
}
