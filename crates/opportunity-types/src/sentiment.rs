//! Per-document sentiment scores.

use serde::{Deserialize, Serialize};

/// Sentiment of a single document.
///
/// Produced independently per document, with no cross-document state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Overall polarity in [-1, 1]
    pub compound: f64,
    /// Share of negative language in [0, 1]
    pub negative: f64,
    /// Share of neutral language in [0, 1]
    pub neutral: f64,
    /// Share of positive language in [0, 1]
    pub positive: f64,
    /// `min(1, |compound| + 0.08 * negative keyword hits)`
    pub complaint_intensity: f64,
}

impl SentimentResult {
    /// Create a sentiment result carrying only a compound score.
    ///
    /// The proportions are left neutral and the complaint intensity is the
    /// absolute compound score.
    pub fn from_compound(compound: f64) -> Self {
        Self {
            compound,
            negative: 0.0,
            neutral: 1.0,
            positive: 0.0,
            complaint_intensity: compound.abs().min(1.0),
        }
    }

    /// Whether the compound polarity leans negative.
    pub fn is_negative(&self) -> bool {
        self.compound < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_compound() {
        let s = SentimentResult::from_compound(-0.6);
        assert!(s.is_negative());
        assert!((s.complaint_intensity - 0.6).abs() < f64::EPSILON);
        assert!((s.neutral - 1.0).abs() < f64::EPSILON);
    }
}
