//! Stored post record format.
//!
//! One JSON object per line. Unknown fields are ignored, so records written
//! by the collector with extra metadata load unchanged.
//!
//! ```json
//! {"post_id":"abc","subreddit":"jobs","title":"...","processed_text":"...",
//!  "created_utc":"2026-01-20T10:30:00","preprocessed":true,"is_candidate":true}
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use opportunity_types::Document;
use serde::Deserialize;

/// A stored post as written by the collector.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    /// Source post id
    pub post_id: String,

    /// Source channel
    #[serde(default)]
    pub subreddit: String,

    /// Original title
    #[serde(default)]
    pub title: Option<String>,

    /// Preprocessed text, absent until preprocessing ran
    #[serde(default)]
    pub processed_text: Option<String>,

    /// Creation time at the source
    #[serde(default)]
    pub created_utc: Option<Timestamp>,

    /// Preprocessing finished
    #[serde(default)]
    pub preprocessed: bool,

    /// Flagged as an opportunity candidate
    #[serde(default)]
    pub is_candidate: bool,
}

/// Timestamp in any of the encodings the collector has produced.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Unix epoch seconds
    Epoch(f64),
    /// RFC 3339, or ISO 8601 without offset (taken as UTC)
    Text(String),
}

impl Timestamp {
    /// Convert to UTC, `None` if unparseable.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(secs) if secs.is_finite() => {
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round() as u32;
                Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single()
            }
            Timestamp::Epoch(_) => None,
            Timestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                }),
        }
    }
}

impl PostRecord {
    /// True if the record is ready for analysis.
    pub fn is_ready(&self) -> bool {
        self.preprocessed
            && self.is_candidate
            && self
                .processed_text
                .as_deref()
                .is_some_and(|text| !text.trim().is_empty())
    }

    /// Convert to a document, stamping `fallback` when the creation time is
    /// missing or unreadable.
    pub fn into_document(self, fallback: DateTime<Utc>) -> Document {
        let created_at = self
            .created_utc
            .as_ref()
            .and_then(Timestamp::to_utc)
            .unwrap_or(fallback);

        let mut doc = Document::new(
            self.post_id,
            self.processed_text.unwrap_or_default(),
            created_at,
            self.subreddit,
        );
        if let Some(title) = self.title {
            doc = doc.with_title(title);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> PostRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let ts = Timestamp::Text("2026-01-20T10:30:00".to_string());
        let expected = Utc.with_ymd_and_hms(2026, 1, 20, 10, 30, 0).unwrap();
        assert_eq!(ts.to_utc(), Some(expected));
    }

    #[test]
    fn test_rfc3339_and_epoch_timestamps() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 20, 10, 30, 0).unwrap();
        let rfc = Timestamp::Text("2026-01-20T12:30:00+02:00".to_string());
        assert_eq!(rfc.to_utc(), Some(expected));

        let epoch = Timestamp::Epoch(expected.timestamp() as f64);
        assert_eq!(epoch.to_utc(), Some(expected));

        assert_eq!(Timestamp::Text("yesterday".to_string()).to_utc(), None);
    }

    #[test]
    fn test_fractional_epoch_keeps_sub_second_part() {
        let millis = |secs: f64| Timestamp::Epoch(secs).to_utc().map(|dt| dt.timestamp_millis());
        assert_eq!(millis(1.25), Some(1250));
        assert_eq!(millis(-1.5), Some(-1500));
        assert_eq!(millis(-0.25), Some(-250));
        assert_eq!(Timestamp::Epoch(f64::NAN).to_utc(), None);
    }

    #[test]
    fn test_ready_record() {
        let record = parse(
            r#"{"post_id":"p1","subreddit":"jobs","processed_text":"no jobs anywhere","preprocessed":true,"is_candidate":true,"score":12}"#,
        );
        assert!(record.is_ready());
    }

    #[test]
    fn test_not_ready_records() {
        let not_candidate = parse(
            r#"{"post_id":"p1","processed_text":"text","preprocessed":true,"is_candidate":false}"#,
        );
        let not_processed = parse(r#"{"post_id":"p2","processed_text":"text","is_candidate":true}"#);
        let blank = parse(
            r#"{"post_id":"p3","processed_text":"  ","preprocessed":true,"is_candidate":true}"#,
        );
        let missing = parse(r#"{"post_id":"p4","preprocessed":true,"is_candidate":true}"#);

        for record in [not_candidate, not_processed, blank, missing] {
            assert!(!record.is_ready(), "{} should not be ready", record.post_id);
        }
    }

    #[test]
    fn test_into_document() {
        let fallback = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let record = parse(
            r#"{"post_id":"p1","subreddit":"renting","title":"Deposit gone","processed_text":"landlord kept deposit","created_utc":"2026-01-20T10:30:00","preprocessed":true,"is_candidate":true}"#,
        );

        let doc = record.into_document(fallback);
        assert_eq!(doc.id, "p1");
        assert_eq!(doc.source, "renting");
        assert_eq!(doc.title.as_deref(), Some("Deposit gone"));
        assert_eq!(
            doc.created_at,
            Utc.with_ymd_and_hms(2026, 1, 20, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_timestamp_uses_fallback() {
        let fallback = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let record = parse(
            r#"{"post_id":"p1","processed_text":"slow app","preprocessed":true,"is_candidate":true}"#,
        );
        assert_eq!(record.into_document(fallback).created_at, fallback);
    }
}
