use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codebundle operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// IO error on a specific path (reading a source or writing the bundle)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundle destination could not be created or truncated
    #[error("Cannot open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Traversal root does not exist
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Traversal root exists but is not a directory
    #[error("Root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// File content is not valid UTF-8
    #[error("File content for {path} is not valid UTF-8 (invalid byte at offset {offset})")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    /// `WalkDir` error when traversing directories
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BundleError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;
