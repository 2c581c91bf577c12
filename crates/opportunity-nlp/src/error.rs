//! NLP collaborator error types.

use thiserror::Error;

/// Errors raised by the sentiment analyzer and topic assigner.
#[derive(Debug, Error)]
pub enum NlpError {
    /// Topic assignment needs at least one document
    #[error("No documents provided for topic modeling")]
    EmptyCorpus,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sentiment analysis failed
    #[error("Sentiment analysis error: {0}")]
    Analyzer(String),

    /// Clustering failed
    #[error("Clustering error: {0}")]
    Clustering(String),
}
