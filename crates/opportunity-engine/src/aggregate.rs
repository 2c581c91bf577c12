//! Per-topic demand and sentiment aggregation.

use std::collections::HashMap;
use std::num::NonZeroU32;

use opportunity_types::{
    Competition, OpportunityError, SentimentResult, TopicAssignment, TopicId, TopicStats,
    TopicStatsTable,
};
use tracing::debug;

/// Fold aligned topic assignments and sentiments into per-topic statistics.
///
/// Noise documents are skipped. The table holds exactly the non-noise topics
/// seen at least once, in order of first appearance, with
/// `demand = document count`, `sentiment = mean compound`, the topic's trend
/// (0.0 when absent) and its competition level.
///
/// Empty inputs give an empty table. Misaligned inputs are a collaborator
/// failure.
pub fn aggregate(
    assignments: &[TopicAssignment],
    sentiments: &[SentimentResult],
    trends: &HashMap<TopicId, f64>,
    competition: &Competition,
) -> Result<TopicStatsTable, OpportunityError> {
    if assignments.len() != sentiments.len() {
        return Err(OpportunityError::Collaborator(format!(
            "{} topic assignments for {} sentiment results",
            assignments.len(),
            sentiments.len()
        )));
    }

    // (topic, count, compound sum) in first-appearance order
    let mut running: Vec<(TopicId, NonZeroU32, f64)> = Vec::new();
    let mut positions: HashMap<TopicId, usize> = HashMap::new();

    for (assignment, sentiment) in assignments.iter().zip(sentiments) {
        let Some(topic_id) = assignment.topic_id() else {
            continue;
        };

        match positions.get(&topic_id) {
            Some(&pos) => {
                let entry = &mut running[pos];
                entry.1 = entry.1.saturating_add(1);
                entry.2 += sentiment.compound;
            }
            None => {
                positions.insert(topic_id, running.len());
                running.push((topic_id, NonZeroU32::MIN, sentiment.compound));
            }
        }
    }

    let table: TopicStatsTable = running
        .into_iter()
        .map(|(topic_id, demand, compound_sum)| {
            let stats = TopicStats {
                demand,
                sentiment: compound_sum / f64::from(demand.get()),
                trend: trends.get(&topic_id).copied().unwrap_or(0.0),
                competition: competition.level_for(topic_id),
            };
            debug!(
                topic = %topic_id,
                demand = stats.demand.get(),
                sentiment = stats.sentiment,
                trend = stats.trend,
                "Aggregated topic"
            );
            (topic_id, stats)
        })
        .collect();

    Ok(table)
}
