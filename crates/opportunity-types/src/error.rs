//! Error types for the opportunity pipeline.

use thiserror::Error;

/// Unified error type for pipeline operations.
///
/// Degenerate statistics (identical demand across topics, a topic with a
/// single week of history) are not errors and never surface here.
#[derive(Debug, Error)]
pub enum OpportunityError {
    /// No documents to process, or no topics left to score
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A collaborator failed or returned malformed data
    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
