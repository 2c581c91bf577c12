//! Error types for document ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading candidate documents.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Post store does not exist
    #[error("Post store not found: {0}")]
    NotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}
