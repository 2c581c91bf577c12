//! Topic identifiers, assignments and per-topic statistics.

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::OpportunityError;

/// Raw label a clustering collaborator uses for "no coherent cluster".
pub const NOISE_LABEL: i64 = -1;

/// Identifier of a non-noise topic cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(u32);

impl TopicId {
    /// Create a topic id from a cluster index.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the cluster index.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TopicId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Topic assignment of a single document.
///
/// Serializes as the raw collaborator label, `-1` for noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TopicAssignment {
    /// Member of a coherent cluster
    Cluster(TopicId),
    /// No confident cluster membership; excluded from aggregation
    Noise,
}

impl TopicAssignment {
    /// Parse a raw collaborator label.
    ///
    /// `-1` is noise, non-negative values are clusters. Any other value is
    /// malformed collaborator output.
    pub fn from_label(label: i64) -> Result<Self, OpportunityError> {
        if label == NOISE_LABEL {
            return Ok(TopicAssignment::Noise);
        }
        u32::try_from(label)
            .map(|id| TopicAssignment::Cluster(TopicId(id)))
            .map_err(|_| OpportunityError::Collaborator(format!("invalid topic label {label}")))
    }

    /// Raw collaborator label.
    pub fn label(self) -> i64 {
        match self {
            TopicAssignment::Cluster(id) => i64::from(id.0),
            TopicAssignment::Noise => NOISE_LABEL,
        }
    }

    /// Topic id, or `None` for noise.
    pub fn topic_id(self) -> Option<TopicId> {
        match self {
            TopicAssignment::Cluster(id) => Some(id),
            TopicAssignment::Noise => None,
        }
    }

    /// Check if this is the noise assignment.
    pub fn is_noise(self) -> bool {
        matches!(self, TopicAssignment::Noise)
    }
}

impl TryFrom<i64> for TopicAssignment {
    type Error = OpportunityError;

    fn try_from(label: i64) -> Result<Self, Self::Error> {
        Self::from_label(label)
    }
}

impl From<TopicAssignment> for i64 {
    fn from(assignment: TopicAssignment) -> Self {
        assignment.label()
    }
}

impl From<TopicId> for TopicAssignment {
    fn from(id: TopicId) -> Self {
        TopicAssignment::Cluster(id)
    }
}

/// Aggregated statistics for one non-noise topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    /// Number of documents assigned to the topic (never zero)
    pub demand: NonZeroU32,
    /// Mean compound sentiment over the topic's documents
    pub sentiment: f64,
    /// Growth rate from the trend estimator, 0.0 when unknown
    pub trend: f64,
    /// How crowded the space already is, in [0, 1]
    pub competition: f64,
}

impl TopicStats {
    /// Demand as a float for normalization.
    pub fn demand_f64(&self) -> f64 {
        f64::from(self.demand.get())
    }
}

/// Insertion-ordered mapping from topic id to statistics.
///
/// Iteration yields topics in the order they were first inserted, which is
/// the order of first appearance during aggregation.
#[derive(Debug, Clone, Default)]
pub struct TopicStatsTable {
    entries: Vec<(TopicId, TopicStats)>,
    index: HashMap<TopicId, usize>,
}

impl TopicStatsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace statistics for a topic.
    ///
    /// Replacing keeps the topic's original position and returns the
    /// previous statistics.
    pub fn insert(&mut self, topic_id: TopicId, stats: TopicStats) -> Option<TopicStats> {
        match self.index.get(&topic_id) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, stats)),
            None => {
                self.index.insert(topic_id, self.entries.len());
                self.entries.push((topic_id, stats));
                None
            }
        }
    }

    /// Get statistics for a topic.
    pub fn get(&self, topic_id: TopicId) -> Option<&TopicStats> {
        self.index.get(&topic_id).map(|&pos| &self.entries[pos].1)
    }

    /// Number of topics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no topics.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate topics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TopicId, &TopicStats)> {
        self.entries.iter().map(|(id, stats)| (*id, stats))
    }

    /// Topic ids in insertion order.
    pub fn topic_ids(&self) -> Vec<TopicId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }
}

impl FromIterator<(TopicId, TopicStats)> for TopicStatsTable {
    fn from_iter<I: IntoIterator<Item = (TopicId, TopicStats)>>(iter: I) -> Self {
        let mut table = TopicStatsTable::new();
        for (topic_id, stats) in iter {
            table.insert(topic_id, stats);
        }
        table
    }
}
