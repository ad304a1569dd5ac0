//! Error types for rule-set loading.
//!
//! The analysis pipeline itself never fails: insufficient data degrades to
//! named neutral defaults instead of surfacing errors. The one fallible
//! surface is deserializing and validating an injected rule set.

use thiserror::Error;

/// Errors produced while loading or validating a [`RuleSet`](crate::rules::RuleSet).
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Failed to parse rule set: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported rule set version {found} (this build understands <= {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Duplicate keyword rule for category '{0}'")]
    DuplicateCategory(String),

    #[error("Duplicate keyword priority {0}")]
    DuplicatePriority(u8),

    #[error("Keyword rule for category '{0}' has no keywords")]
    EmptyKeywords(String),

    #[error("Confidence thresholds for '{dimension}' are inverted: high_at {high_at} < medium_at {medium_at}")]
    InvertedThresholds {
        dimension: String,
        high_at: usize,
        medium_at: usize,
    },

    #[error("Action rule {0} maps to no actions")]
    EmptyActionRule(usize),
}
