//! Rule error types.

use thiserror::Error;
use weft_core::StoreError;
use weft_pattern::PatternError;

/// Result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that can occur during forward chaining.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Maximum rounds ({rounds}) exceeded")]
    MaxRoundsExceeded { rounds: usize },

    #[error("Maximum results ({count}) exceeded")]
    MaxResultsExceeded { count: usize },

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown rule: {name}")]
    UnknownRule { name: String },

    #[error("Duplicate rule: {name}")]
    DuplicateRule { name: String },
}

impl RuleError {
    pub fn max_rounds_exceeded(rounds: usize) -> Self {
        Self::MaxRoundsExceeded { rounds }
    }

    pub fn max_results_exceeded(count: usize) -> Self {
        Self::MaxResultsExceeded { count }
    }

    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub fn duplicate_rule(name: impl Into<String>) -> Self {
        Self::DuplicateRule { name: name.into() }
    }
}
