use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading scenarios or decoding session contexts.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A scenario file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario is not valid YAML or does not have the expected shape.
    #[error("invalid scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A context could not be serialized.
    #[error("cannot encode context: {0}")]
    Encode(String),

    /// A context blob is not valid base64 or JSON.
    #[error("cannot decode context: {0}")]
    Decode(String),

    /// A scenario entry refers to a room that does not exist.
    #[error("no room named {0}")]
    UnknownRoom(String),

    /// Two rooms or two characters share a name.
    #[error("duplicate name: \"{0}\"")]
    DuplicateName(String),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
