//! Per-document sentiment analysis.
//!
//! The default analyzer runs VADER (Valence Aware Dictionary and sEntiment
//! Reasoner), which is tuned for social media text, on the cleaned post and
//! adds a complaint-intensity signal from a small set of negative keywords.

use opportunity_types::{round_to, SentimentResult};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::NlpError;
use crate::text::clean_text;

/// Keywords that mark a post as a complaint.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "crash", "slow", "bug", "issue", "problem", "hate", "broken", "annoying", "delay", "error",
];

/// Complaint intensity added per matched negative keyword.
const KEYWORD_HIT_WEIGHT: f64 = 0.08;

/// Decimals kept on every sentiment output.
const SENTIMENT_DECIMALS: i32 = 3;

/// Trait for per-document sentiment analysis.
///
/// Implementations must be pure functions of the input text and safe to
/// share across threads.
pub trait SentimentAnalyzer: Send + Sync {
    /// Analyze a single document.
    fn analyze(&self, text: &str) -> Result<SentimentResult, NlpError>;

    /// Analyze many documents, keeping input order.
    /// Default implementation calls analyze() for each text.
    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<SentimentResult>, NlpError> {
        texts.iter().map(|text| self.analyze(text)).collect()
    }
}

/// VADER-backed sentiment analyzer with complaint keyword boosting.
///
/// # Example
/// ```rust,ignore
/// use opportunity_nlp::{SentimentAnalyzer, VaderSentimentAnalyzer};
///
/// let analyzer = VaderSentimentAnalyzer::new();
/// let result = analyzer.analyze("The app is slow and keeps crashing").unwrap();
/// assert!(result.complaint_intensity > 0.0);
/// ```
pub struct VaderSentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderSentimentAnalyzer {
    /// Create a new analyzer instance.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for VaderSentimentAnalyzer {
    fn analyze(&self, text: &str) -> Result<SentimentResult, NlpError> {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return Ok(SentimentResult {
                compound: 0.0,
                negative: 0.0,
                neutral: 0.0,
                positive: 0.0,
                complaint_intensity: 0.0,
            });
        }

        let scores = self.analyzer.polarity_scores(&cleaned);
        let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        let compound = score("compound");
        if !compound.is_finite() {
            return Err(NlpError::Analyzer(format!(
                "non-finite compound score for text of {} chars",
                text.len()
            )));
        }

        let hits = negative_keyword_hits(&cleaned);
        let complaint_intensity = complaint_intensity(compound, hits);

        Ok(SentimentResult {
            compound: round_to(compound, SENTIMENT_DECIMALS),
            negative: round_to(score("neg"), SENTIMENT_DECIMALS),
            neutral: round_to(score("neu"), SENTIMENT_DECIMALS),
            positive: round_to(score("pos"), SENTIMENT_DECIMALS),
            complaint_intensity: round_to(complaint_intensity, SENTIMENT_DECIMALS),
        })
    }
}

/// Count distinct negative keywords contained in cleaned text.
///
/// Matching is by substring, so "crashes" counts as "crash". Each keyword
/// counts at most once.
pub fn negative_keyword_hits(cleaned: &str) -> usize {
    NEGATIVE_KEYWORDS
        .iter()
        .filter(|keyword| cleaned.contains(*keyword))
        .count()
}

/// `min(1, |compound| + 0.08 * hits)`
pub fn complaint_intensity(compound: f64, hits: usize) -> f64 {
    (compound.abs() + KEYWORD_HIT_WEIGHT * hits as f64).min(1.0)
}
