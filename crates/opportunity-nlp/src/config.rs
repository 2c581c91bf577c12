//! Topic model configuration.

use serde::{Deserialize, Serialize};

/// Settings for the default topic assigner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicModelConfig {
    /// Number of keywords kept per topic
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    /// Upper bound on k-means refinement rounds
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Seed for centroid initialisation
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Seeded k-means restarts; the lowest-inertia partition wins
    #[serde(default = "default_restarts")]
    pub restarts: usize,
}

impl Default for TopicModelConfig {
    fn default() -> Self {
        Self {
            top_keywords: default_top_keywords(),
            max_iterations: default_max_iterations(),
            seed: default_seed(),
            restarts: default_restarts(),
        }
    }
}

impl TopicModelConfig {
    /// Set the number of keywords kept per topic.
    pub fn with_top_keywords(mut self, top_keywords: usize) -> Self {
        self.top_keywords = top_keywords;
        self
    }
}

fn default_top_keywords() -> usize {
    10
}
fn default_max_iterations() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_restarts() -> usize {
    10
}
