//! Error types for the `garlic-nix` crate.

use std::path::PathBuf;

/// Errors produced while building or evaluating a shell descriptor.
///
/// Evaluation has no partial results: any of these aborts the whole shell.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NixError {
    /// The package-set import path does not exist.
    #[error("package set import not found: {}", path.display())]
    ImportNotFound { path: PathBuf },

    /// The import path exists but is not a usable package collection.
    #[error("invalid package collection at {}: {reason}", path.display())]
    InvalidCollection { path: PathBuf, reason: String },

    /// A requested build tool is absent from the package collection.
    #[error("build tool '{name}' not found in package collection")]
    UnknownTool { name: String },

    /// A build tool name is not a valid attribute identifier.
    #[error("invalid build tool name '{name}': {reason}")]
    InvalidToolName { name: String, reason: String },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
