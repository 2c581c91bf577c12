//! In-memory document source.

use opportunity_types::Document;

use crate::error::IngestError;
use crate::source::DocumentSource;

/// Serves a fixed list of documents.
///
/// Documents with blank text are skipped so the source honours the same
/// contract as the file-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: Vec<Document>,
}

impl InMemorySource {
    /// Create a source over the given documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents held, blank ones included.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no documents are held.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for InMemorySource {
    fn fetch_candidate_documents(&self, limit: usize) -> Result<Vec<Document>, IngestError> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| !doc.processed_text.trim().is_empty())
            .take(limit)
            .cloned()
            .collect())
    }
}
