//! Error types for coordinate patching.
//!
//! Every variant is fatal: the first one raised aborts the run and its
//! `Display` text is the single diagnostic line the CLI prints.

use thiserror::Error;

/// Result type for coordinate patching operations.
pub type PatchResult<T> = Result<T, PatchError>;

/// Errors that abort a patch run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    /// Wrong number of positional arguments
    #[error("Usage: {program} <latitude> <longitude> <file>")]
    Usage { program: String },

    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Failed to close {path}: {message}")]
    CloseFailed { path: String, message: String },

    /// Candidate list was empty
    #[error("No dimension names provided")]
    NoCandidateNames,

    /// None of the candidates exist; carries the first candidate only
    #[error("Variable {0} does not exist")]
    VariableNotFound(String),

    #[error("Unable to read dimensions of variable {name}: {message}")]
    DimensionQuery { name: String, message: String },

    #[error("Variable {name} has {ndims} dimensions (expected 1)")]
    DimensionCount { name: String, ndims: usize },

    #[error("Length of dimension {name} is {len} (expected 1)")]
    DimensionLength { name: String, len: usize },

    #[error("Failed to write {name}: {message}")]
    ScalarWrite { name: String, message: String },
}

impl PatchError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Error text reported by the underlying data-access library.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<netcdf::Error> for StoreError {
    fn from(err: netcdf::Error) -> Self {
        Self(err.to_string())
    }
}
