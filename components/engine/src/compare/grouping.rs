//! Replacement grouping and record construction.

use tracing::debug;

use super::spans::{EditSpan, SpanKind};
use crate::config::CompareConfig;
use crate::domain::{Author, ChangeRecord};
use crate::similarity::similarity;

/// Turns the surviving spans into records, pairing a Delete with the Insert
/// right after it when the two look like one rewrite.
pub(crate) fn group_spans(
    spans: Vec<EditSpan>,
    config: &CompareConfig,
    author: &Author,
    timestamp: i64,
) -> Vec<ChangeRecord> {
    let mut records = Vec::with_capacity(spans.len());
    let mut spans = spans.into_iter().peekable();

    while let Some(span) = spans.next() {
        if span.kind == SpanKind::Delete
            && let Some(insert) = spans.next_if(|next| pairs_with(&span, next, config))
        {
            let score = similarity(&span.text, &insert.text);
            debug!(similarity = score, "Grouped delete and insert into replacement");
            let mut record = ChangeRecord::replacement(
                insert.current,
                span.baseline,
                span.text,
                insert.text,
                author.clone(),
                timestamp,
            );
            record.confidence = 0.5 + 0.5 * score;
            records.push(record);
            continue;
        }
        records.push(single_record(span, author, timestamp));
    }
    records
}

fn pairs_with(delete: &EditSpan, insert: &EditSpan, config: &CompareConfig) -> bool {
    if insert.kind != SpanKind::Insert
        || insert.current.from.abs_diff(delete.current.from) > config.replacement_gap
    {
        return false;
    }
    // Same text somewhere else is relocated content, not a rewrite.
    if delete.text == insert.text && delete.current.from != insert.current.from {
        return false;
    }
    let short = delete.text.chars().count() < config.short_replacement_len
        && insert.text.chars().count() < config.short_replacement_len;
    short || similarity(&delete.text, &insert.text) > config.replacement_similarity
}

fn single_record(span: EditSpan, author: &Author, timestamp: i64) -> ChangeRecord {
    match span.kind {
        SpanKind::Insert => {
            let mut record =
                ChangeRecord::insertion(span.current, span.text, author.clone(), timestamp);
            record.original_range = Some(span.baseline);
            record
        }
        SpanKind::Delete => ChangeRecord::deletion(
            span.current.from,
            span.baseline,
            span.text,
            author.clone(),
            timestamp,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeKind, TextRange};

    fn delete(at: usize, base: usize, text: &str) -> EditSpan {
        EditSpan {
            kind: SpanKind::Delete,
            text: text.to_string(),
            current: TextRange::point(at),
            baseline: TextRange::new(base, base + text.chars().count()),
        }
    }

    fn insert(at: usize, base: usize, text: &str) -> EditSpan {
        EditSpan {
            kind: SpanKind::Insert,
            text: text.to_string(),
            current: TextRange::new(at, at + text.chars().count()),
            baseline: TextRange::point(base),
        }
    }

    #[test]
    fn test_short_pair_becomes_replacement() {
        let records = group_spans(
            vec![delete(4, 4, "cat "), insert(4, 8, "dog ")],
            &CompareConfig::default(),
            &Author::anonymous(),
            0,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Replacement);
        assert_eq!(records[0].deleted(), "cat ");
        assert_eq!(records[0].inserted(), "dog ");
        assert_eq!(records[0].range, TextRange::new(4, 8));
        assert_eq!(records[0].original_range, Some(TextRange::new(4, 8)));
    }

    #[test]
    fn test_relocated_identical_text_is_not_a_replacement() {
        let records = group_spans(
            vec![delete(0, 0, "A\n\n"), insert(3, 6, "A\n\n")],
            &CompareConfig::default(),
            &Author::anonymous(),
            0,
        );
        let kinds: Vec<ChangeKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Deletion, ChangeKind::Insertion]);
        assert_eq!(records[0].deleted(), "A\n\n");
        assert_eq!(records[1].inserted(), "A\n\n");
    }

    #[test]
    fn test_unrelated_long_pair_stays_separate() {
        let old = "an entirely unrelated sentence about taxes ";
        let new = "zzzz qqqq xxxx wwww vvvv kkkk jjjj";
        let records = group_spans(
            vec![delete(0, 0, old), insert(0, 43, new)],
            &CompareConfig::default(),
            &Author::anonymous(),
            0,
        );
        let kinds: Vec<ChangeKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Deletion, ChangeKind::Insertion]);
        assert!((records[0].confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distant_insert_is_not_paired() {
        let records = group_spans(
            vec![delete(0, 0, "a "), insert(30, 32, "b ")],
            &CompareConfig::default(),
            &Author::anonymous(),
            0,
        );
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_replacement_confidence() {
        let records = group_spans(
            vec![delete(0, 0, "Hello World"), insert(0, 11, "hello world")],
            &CompareConfig::default(),
            &Author::anonymous(),
            0,
        );
        let expected = 0.5 + 0.5 * (9.0 / 11.0);
        assert!((records[0].confidence - expected).abs() < 1e-9);
    }
}
