//! Substantive/stylistic classification.

use crate::config::CompareConfig;
use crate::domain::{ChangeKind, ChangeRecord, Classification};
use crate::similarity::{normalize, similarity};

/// Classifies a change by comparing its normalized old and new text.
#[must_use]
pub fn classify(old: &str, new: &str, config: &CompareConfig) -> Classification {
    let (old, new) = (normalize(old), normalize(new));
    if old == new {
        Classification::STYLISTIC
    } else if similarity(&old, &new) > config.stylistic_threshold {
        Classification::BOTH
    } else {
        Classification::SUBSTANTIVE
    }
}

/// Fills in `classification` for insertions, deletions and replacements.
pub(crate) fn classify_records(records: &mut [ChangeRecord], config: &CompareConfig) {
    for record in records.iter_mut().filter(|r| r.kind != ChangeKind::Move) {
        record.classification = Some(classify(record.deleted(), record.inserted(), config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_only_is_stylistic() {
        let class = classify("Hello World", "hello world", &CompareConfig::default());
        assert_eq!(class, Classification::STYLISTIC);
    }

    #[test]
    fn test_punctuation_insertion_is_stylistic() {
        assert_eq!(
            classify("", ", ", &CompareConfig::default()),
            Classification::STYLISTIC
        );
    }

    #[test]
    fn test_small_wording_change_is_both() {
        let class = classify(
            "the committee approved the budget",
            "the committee approves the budget",
            &CompareConfig::default(),
        );
        assert_eq!(class, Classification::BOTH);
    }

    #[test]
    fn test_new_content_is_substantive() {
        assert_eq!(
            classify("", "brown ", &CompareConfig::default()),
            Classification::SUBSTANTIVE
        );
        assert_eq!(
            classify("cats", "dogs", &CompareConfig::default()),
            Classification::SUBSTANTIVE
        );
    }
}
