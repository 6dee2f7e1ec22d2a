//! Knowledge-base error types.

use std::path::PathBuf;

/// Errors raised while loading or validating a knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    /// A KB file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A KB file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required KB file is missing from the directory.
    #[error("required knowledge file not found: {0}")]
    MissingFile(PathBuf),

    /// The tables load but violate a KB invariant.
    #[error("invalid knowledge base: {0}")]
    Validation(String),
}
