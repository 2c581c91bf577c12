//! Opportunity scoring and ranking.
//!
//! Two passes over the topic table: the first collects demand and trend
//! ranges, the second combines four factors per topic:
//!
//! ```text
//! score = w_demand * D + w_sentiment * |sentiment| + w_trend * T + w_competition * (1 - competition)
//! ```
//!
//! where `D` and `T` are min-max normalized demand and trend. Scores are
//! rounded to 4 decimals and sorted descending with a stable sort, so equal
//! scores keep the table's first-appearance order.

use std::cmp::Ordering;

use opportunity_types::{round_to, OpportunityError, ScoringWeights, TopicId, TopicStatsTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Decimals kept on opportunity scores.
const SCORE_DECIMALS: i32 = 4;

/// Scale `x` into [0, 1] relative to `[lo, hi]`.
///
/// Returns 0.0 when `hi == lo`, so a factor shared by every topic adds
/// nothing instead of producing NaN.
pub fn normalize(x: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        0.0
    } else {
        (x - lo) / (hi - lo)
    }
}

/// A topic with its opportunity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedTopic {
    pub topic_id: TopicId,
    pub score: f64,
}

/// Weighted multi-factor scorer.
#[derive(Debug, Clone, Default)]
pub struct OpportunityScorer {
    weights: ScoringWeights,
}

impl OpportunityScorer {
    /// Create a scorer with the given factor weights.
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Factor weights in use.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and rank every topic in the table.
    ///
    /// The output is a permutation of the table's topics sorted by
    /// non-increasing score. An empty table is an `EmptyInput` error: there
    /// is no range to normalize against.
    #[instrument(skip(self, stats), fields(topics = stats.len()))]
    pub fn score(&self, stats: &TopicStatsTable) -> Result<Vec<RankedTopic>, OpportunityError> {
        if stats.is_empty() {
            return Err(OpportunityError::EmptyInput(
                "no topics to score".to_string(),
            ));
        }

        let (min_demand, max_demand) = range(stats.iter().map(|(_, s)| s.demand_f64()));
        let (min_trend, max_trend) = range(stats.iter().map(|(_, s)| s.trend));

        let w = &self.weights;
        let mut ranked: Vec<RankedTopic> = stats
            .iter()
            .map(|(topic_id, s)| {
                let demand = normalize(s.demand_f64(), min_demand, max_demand);
                let intensity = s.sentiment.abs();
                let trend = normalize(s.trend, min_trend, max_trend);
                let whitespace = 1.0 - s.competition;

                let raw = w.demand * demand
                    + w.sentiment * intensity
                    + w.trend * trend
                    + w.competition * whitespace;
                let score = round_to(raw, SCORE_DECIMALS);

                debug!(
                    topic = %topic_id,
                    demand,
                    intensity,
                    trend,
                    whitespace,
                    score,
                    "Scored topic"
                );
                RankedTopic { topic_id, score }
            })
            .collect();

        // sort_by is stable: ties keep table order
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(ranked)
    }
}

/// Minimum and maximum of a non-empty sequence.
fn range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
