//! The document source seam.

use opportunity_types::Document;

use crate::error::IngestError;

/// Trait for loading candidate documents.
///
/// Implementations return only preprocessed candidate posts with non-empty
/// text, in a stable order, and never more than `limit`.
pub trait DocumentSource: Send + Sync {
    /// Load up to `limit` candidate documents.
    fn fetch_candidate_documents(&self, limit: usize) -> Result<Vec<Document>, IngestError>;
}
