//! Error types for playback and input validation.

use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when validating input or starting a run.
///
/// All of these are recoverable: the user corrects the input (or the
/// selection) and retries. Engines themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A value field was left blank
    #[error("field {field} is empty")]
    MissingField { field: usize },

    /// A value field does not parse as an integer
    #[error("field {field}: '{value}' is not a valid integer")]
    InvalidInteger { field: usize, value: String },

    /// The wrong number of value fields was supplied
    #[error("expected {expected} value fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    /// A run cannot start over an empty sequence
    #[error("cannot start a run over an empty sequence")]
    EmptySequence,

    /// Selection key not present in the engine registry
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}
