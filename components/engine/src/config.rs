//! Engine tuning thresholds.
//!
//! Both structs deserialize with per-field defaults so a host can override a
//! single value from its own configuration layer.

use serde::{Deserialize, Serialize};

/// Thresholds for the static diff & alignment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Minimum normalized similarity for two chunks to count as a move (default: 0.85)
    #[serde(default = "default_move_threshold")]
    pub move_threshold: f64,

    /// Baseline chunks shorter than this are never move candidates (default: 20)
    #[serde(default = "default_min_move_len")]
    pub min_move_len: usize,

    /// Similarity above which a Delete + Insert pair becomes a Replacement (default: 0.4)
    #[serde(default = "default_replacement_similarity")]
    pub replacement_similarity: f64,

    /// Pairs where both texts are shorter than this always group (default: 20)
    #[serde(default = "default_short_replacement_len")]
    pub short_replacement_len: usize,

    /// Maximum distance in chars between a Delete and the following Insert (default: 5)
    #[serde(default = "default_replacement_gap")]
    pub replacement_gap: usize,

    /// Similarity above which a substantive change is also flagged stylistic (default: 0.85)
    #[serde(default = "default_stylistic_threshold")]
    pub stylistic_threshold: f64,

    /// Minimum similarity for the greedy alignment pass (default: 0.6)
    #[serde(default = "default_alignment_threshold")]
    pub alignment_threshold: f64,

    /// Confidence at or above which a record counts as high-confidence (default: 0.8)
    #[serde(default = "default_high_confidence")]
    pub high_confidence: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            move_threshold: default_move_threshold(),
            min_move_len: default_min_move_len(),
            replacement_similarity: default_replacement_similarity(),
            short_replacement_len: default_short_replacement_len(),
            replacement_gap: default_replacement_gap(),
            stylistic_threshold: default_stylistic_threshold(),
            alignment_threshold: default_alignment_threshold(),
            high_confidence: default_high_confidence(),
        }
    }
}

/// Thresholds for the live change-tracking engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Records further apart in time than this are never coalesced (default: 3000)
    #[serde(default = "default_coalesce_window_ms")]
    pub coalesce_window_ms: i64,

    /// Maximum distance between original deletion offsets that still coalesce (default: 5)
    #[serde(default = "default_deletion_gap")]
    pub deletion_gap: usize,

    /// Deletions longer than this many chars are never coalesced (default: 10)
    #[serde(default = "default_block_limit")]
    pub block_limit: usize,

    /// Window in which an edit identical to a review patch is treated as its echo (default: 750)
    #[serde(default = "default_review_cooldown_ms")]
    pub review_cooldown_ms: i64,

    /// Number of edit steps kept for stale-position mapping (default: 256)
    #[serde(default = "default_position_log_capacity")]
    pub position_log_capacity: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            coalesce_window_ms: default_coalesce_window_ms(),
            deletion_gap: default_deletion_gap(),
            block_limit: default_block_limit(),
            review_cooldown_ms: default_review_cooldown_ms(),
            position_log_capacity: default_position_log_capacity(),
        }
    }
}

fn default_move_threshold() -> f64 {
    0.85
}

fn default_min_move_len() -> usize {
    20
}

fn default_replacement_similarity() -> f64 {
    0.4
}

fn default_short_replacement_len() -> usize {
    20
}

fn default_replacement_gap() -> usize {
    5
}

fn default_stylistic_threshold() -> f64 {
    0.85
}

fn default_alignment_threshold() -> f64 {
    0.6
}

fn default_high_confidence() -> f64 {
    0.8
}

fn default_coalesce_window_ms() -> i64 {
    3000
}

fn default_deletion_gap() -> usize {
    5
}

fn default_block_limit() -> usize {
    10
}

fn default_review_cooldown_ms() -> i64 {
    750
}

fn default_position_log_capacity() -> usize {
    256
}
