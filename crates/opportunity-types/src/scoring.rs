//! Scoring inputs and outputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::topic::TopicId;

/// Weights of the four opportunity factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of normalized demand
    #[serde(default = "default_demand_weight")]
    pub demand: f64,

    /// Weight of sentiment intensity
    #[serde(default = "default_sentiment_weight")]
    pub sentiment: f64,

    /// Weight of normalized trend
    #[serde(default = "default_trend_weight")]
    pub trend: f64,

    /// Weight of whitespace (1 - competition)
    #[serde(default = "default_competition_weight")]
    pub competition: f64,
}

pub(crate) fn default_demand_weight() -> f64 {
    0.35
}
pub(crate) fn default_sentiment_weight() -> f64 {
    0.25
}
pub(crate) fn default_trend_weight() -> f64 {
    0.25
}
pub(crate) fn default_competition_weight() -> f64 {
    0.15
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            demand: default_demand_weight(),
            sentiment: default_sentiment_weight(),
            trend: default_trend_weight(),
            competition: default_competition_weight(),
        }
    }
}

impl ScoringWeights {
    /// Validate weight values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("demand", self.demand),
            ("sentiment", self.sentiment),
            ("trend", self.trend),
            ("competition", self.competition),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} weight must be finite and >= 0, got {value}"));
            }
        }
        Ok(())
    }
}

/// Round half away from zero to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Neutral competition level used when nothing is known about a topic.
pub const NEUTRAL_COMPETITION: f64 = 0.5;

pub(crate) fn default_competition() -> f64 {
    NEUTRAL_COMPETITION
}

/// External competition input.
///
/// No estimator exists inside the pipeline; callers supply a default level
/// and optionally per-topic values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    /// Level used for topics without an override
    #[serde(default = "default_competition")]
    pub default: f64,

    /// Per-topic competition levels
    #[serde(default)]
    pub overrides: HashMap<TopicId, f64>,
}

impl Competition {
    /// Same competition level for every topic.
    pub fn uniform(level: f64) -> Self {
        Self {
            default: level,
            overrides: HashMap::new(),
        }
    }

    /// Set the competition level of one topic.
    pub fn with_override(mut self, topic_id: TopicId, level: f64) -> Self {
        self.overrides.insert(topic_id, level);
        self
    }

    /// Competition level for a topic.
    pub fn level_for(&self, topic_id: TopicId) -> f64 {
        self.overrides
            .get(&topic_id)
            .copied()
            .unwrap_or(self.default)
    }

    /// Validate that every level lies in [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.default) {
            return Err(format!(
                "competition default must be 0.0-1.0, got {}",
                self.default
            ));
        }
        if let Some((topic_id, level)) = self
            .overrides
            .iter()
            .find(|(_, level)| !(0.0..=1.0).contains(*level))
        {
            return Err(format!(
                "competition for topic {topic_id} must be 0.0-1.0, got {level}"
            ));
        }
        Ok(())
    }
}

impl Default for Competition {
    fn default() -> Self {
        Self::uniform(NEUTRAL_COMPETITION)
    }
}

/// A ranked business opportunity.
///
/// This is the terminal artifact of a pipeline run and the contract consumed
/// by presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityScore {
    /// Topic cluster the opportunity was derived from
    pub topic_id: TopicId,
    /// Weighted opportunity score, rounded to 4 decimals
    pub score: f64,
    /// Document volume of the topic
    pub demand: u32,
    /// Growth rate of the topic
    pub trend: f64,
    /// Topic keywords, most representative first
    pub keywords: Vec<String>,
}
