//! Error types for ruleset configuration

use tagguard_types::{ContentCategory, RatingLevel};
use thiserror::Error;

/// Ruleset configuration errors, reported at construction or load time.
#[derive(Debug, Error)]
pub enum RulesetError {
    /// A category appears more than once in the unlock order
    #[error("category {category} appears more than once in the unlock order")]
    DuplicateInOrder { category: ContentCategory },

    /// A catalog category is absent from the unlock order
    #[error("category {category} is missing from the unlock order")]
    MissingFromOrder { category: ContentCategory },

    /// A rating level has no threshold entry
    #[error("no unlock threshold configured for rating level {level}")]
    MissingLevel { level: RatingLevel },

    /// A threshold exceeds the catalog size
    #[error("threshold {threshold} for rating level {level} exceeds the catalog size {catalog}")]
    ThresholdOutOfRange {
        level: RatingLevel,
        threshold: usize,
        catalog: usize,
    },

    /// A threshold is lower than the one configured for a lower level
    #[error("threshold {threshold} for rating level {level} is below the preceding level's {previous}")]
    NonMonotonic {
        level: RatingLevel,
        threshold: usize,
        previous: usize,
    },

    /// The top of the scale does not unlock the full catalog
    #[error("top rating level unlocks only {threshold} of {catalog} categories")]
    TopLevelIncomplete { threshold: usize, catalog: usize },

    /// The ruleset document could not be parsed
    #[error("malformed ruleset document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for ruleset operations
pub type Result<T> = std::result::Result<T, RulesetError>;
