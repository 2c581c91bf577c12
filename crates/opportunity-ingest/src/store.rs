//! JSON-lines post store.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::Utc;
use opportunity_types::Document;
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::record::PostRecord;
use crate::source::DocumentSource;

/// Reads candidate posts from a JSON-lines file.
///
/// Records are kept when they are preprocessed, flagged as candidates and
/// carry non-blank text. File order is preserved. Malformed lines are
/// skipped with a warning.
#[derive(Debug, Clone)]
pub struct JsonlPostStore {
    path: PathBuf,
}

impl JsonlPostStore {
    /// Create a store over the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for JsonlPostStore {
    fn fetch_candidate_documents(&self, limit: usize) -> Result<Vec<Document>, IngestError> {
        if !self.path.exists() {
            return Err(IngestError::NotFound(self.path.clone()));
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let loaded_at = Utc::now();
        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for (index, bytes) in reader.split(b'\n').enumerate() {
            if documents.len() >= limit {
                break;
            }

            let bytes = bytes?;
            let parsed = std::str::from_utf8(&bytes)
                .map_err(|e| e.to_string())
                .and_then(|line| {
                    if line.trim().is_empty() {
                        Ok(None)
                    } else {
                        serde_json::from_str::<PostRecord>(line)
                            .map(Some)
                            .map_err(|e| e.to_string())
                    }
                });

            let record = match parsed {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(message) => {
                    let error = IngestError::Parse {
                        line: index + 1,
                        message,
                    };
                    warn!(path = %self.path.display(), error = %error, "Skipping malformed post record");
                    skipped += 1;
                    continue;
                }
            };

            if !record.is_ready() {
                debug!(post_id = %record.post_id, "Skipping post that is not a ready candidate");
                continue;
            }

            documents.push(record.into_document(loaded_at));
        }

        info!(
            path = %self.path.display(),
            loaded = documents.len(),
            malformed = skipped,
            limit,
            "Loaded candidate posts"
        );

        Ok(documents)
    }
}
