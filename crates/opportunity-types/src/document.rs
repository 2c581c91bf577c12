//! Document type for pipeline input.
//!
//! Documents are immutable once loaded. The ingestion layer only hands over
//! posts that were already preprocessed and carry non-empty text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A preprocessed social-media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (post id)
    pub id: String,

    /// Cleaned text used for sentiment and topic assignment
    pub processed_text: String,

    /// When the post was created at the source
    pub created_at: DateTime<Utc>,

    /// Source channel (subreddit)
    pub source: String,

    /// Original title, kept for previews
    #[serde(default)]
    pub title: Option<String>,
}

impl Document {
    /// Create a new document.
    pub fn new(
        id: impl Into<String>,
        processed_text: impl Into<String>,
        created_at: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            processed_text: processed_text.into(),
            created_at,
            source: source.into(),
            title: None,
        }
    }

    /// Attach the original title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Short preview of the processed text, cut at a char boundary.
    pub fn preview(&self, max_chars: usize) -> String {
        self.processed_text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_serialization() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 20, 10, 30, 0).unwrap();
        let doc = Document::new("abc123", "job search is painful", ts, "developersIndia")
            .with_title("Frustrated with job search");

        let json = serde_json::to_string(&doc).unwrap();
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, decoded);
    }

    #[test]
    fn test_title_optional() {
        let json = r#"{"id":"x","processed_text":"slow app","created_at":"2026-01-20T10:30:00Z","source":"SaaS"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_preview_multibyte() {
        let doc = Document::new("x", "café crash", Utc::now(), "food");
        assert_eq!(doc.preview(4), "café");
    }
}
