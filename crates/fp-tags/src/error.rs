//! Error types for tag evaluation.

use thiserror::Error;

/// Result type for tag evaluation.
pub type TagResult<T> = Result<T, TagError>;

/// Authoring errors found while evaluating a conditional reply.
///
/// They depend only on the scenario text and the context, so retrying the
/// same turn fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A candidate has no `if` or `default` tag.
    #[error("condition tag not found in candidate {index}")]
    GuardMissing {
        /// Position of the candidate in its list.
        index: usize,
    },

    /// A guard tag carries a command that is not a condition.
    #[error("invalid condition tag: {0}")]
    InvalidCondition(String),

    /// Every guard was evaluated and none held.
    #[error("no condition met")]
    NoConditionMet,
}
