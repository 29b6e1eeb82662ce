//! Error types for the fiction engine.

use fp_core::CoreError;
use fp_tags::TagError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while playing a scenario.
#[derive(Debug, Error)]
pub enum FictionError {
    /// No character with this name exists in the scenario.
    #[error("no character named {0}")]
    UnknownCharacter(String),

    /// No room with this name exists in the scenario.
    #[error("no room named {0}")]
    UnknownRoom(String),

    /// A conditional reply could not be resolved.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// Loading or decoding failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FictionError {
    /// Lookups a player can trigger by asking for a name that does not
    /// exist. Everything else is a scenario authoring bug.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownCharacter(_) | Self::UnknownRoom(_))
    }
}
