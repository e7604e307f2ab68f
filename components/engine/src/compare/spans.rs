//! Step 1: token diff → positioned insert/delete spans.

use crate::diff::{DiffAlgorithm, DiffOp, Granularity, Token, tokenize};
use crate::domain::TextRange;

/// Whether a span adds or removes text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanKind {
    Insert,
    Delete,
}

/// One run of inserted or deleted tokens.
///
/// `current` is where the span sits in the current snapshot (a point for
/// deletions), `baseline` where it sits in the baseline (a point for inserts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditSpan {
    pub kind: SpanKind,
    pub text: String,
    pub current: TextRange,
    pub baseline: TextRange,
}

/// Diffs both snapshots at `granularity` and walks the script left to right.
pub(crate) fn edit_spans(
    baseline: &str,
    current: &str,
    granularity: Granularity,
    algorithm: &dyn DiffAlgorithm,
) -> Vec<EditSpan> {
    let base_tokens = tokenize(baseline, granularity);
    let curr_tokens = tokenize(current, granularity);
    let base_texts: Vec<&str> = base_tokens.iter().map(|t| t.text).collect();
    let curr_texts: Vec<&str> = curr_tokens.iter().map(|t| t.text).collect();

    let mut spans = Vec::new();
    let (mut base_pos, mut curr_pos) = (0, 0);
    for op in algorithm.diff(&base_texts, &curr_texts) {
        match op {
            DiffOp::Equal {
                old_end, new_end, ..
            } => {
                base_pos = base_tokens[old_end - 1].end;
                curr_pos = curr_tokens[new_end - 1].end;
            }
            DiffOp::Delete { old_start, old_end } => {
                let run = &base_tokens[old_start..old_end];
                let end = run[run.len() - 1].end;
                spans.push(EditSpan {
                    kind: SpanKind::Delete,
                    text: join(run),
                    current: TextRange::point(curr_pos),
                    baseline: TextRange::new(run[0].start, end),
                });
                base_pos = end;
            }
            DiffOp::Insert { new_start, new_end } => {
                let run = &curr_tokens[new_start..new_end];
                let end = run[run.len() - 1].end;
                spans.push(EditSpan {
                    kind: SpanKind::Insert,
                    text: join(run),
                    current: TextRange::new(run[0].start, end),
                    baseline: TextRange::point(base_pos),
                });
                curr_pos = end;
            }
        }
    }
    spans
}

fn join(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}
