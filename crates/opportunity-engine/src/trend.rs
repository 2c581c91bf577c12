//! Weekly growth rate per topic.
//!
//! Timestamps are bucketed by ISO year-week. Buckets are ordered
//! chronologically, so "first" and "last" mean the earliest and latest
//! observed week no matter how the input was ordered.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use opportunity_types::{round_to, TopicAssignment, TopicId};
use tracing::debug;

/// ISO week-numbering year and week.
pub type WeekKey = (i32, u32);

/// Decimals kept on growth rates.
const TREND_DECIMALS: i32 = 3;

/// Bucket key for a timestamp.
pub fn week_key(timestamp: &DateTime<Utc>) -> WeekKey {
    let week = timestamp.iso_week();
    (week.year(), week.week())
}

/// Estimate a growth rate for every topic with at least two weeks of data.
///
/// `growth = (last - first) / max(1, first)` over weekly document counts,
/// rounded to 3 decimals. Topics seen in a single week are absent from the
/// result, and noise entries are ignored.
pub fn estimate_trends(entries: &[(TopicAssignment, DateTime<Utc>)]) -> HashMap<TopicId, f64> {
    let mut buckets: HashMap<TopicId, BTreeMap<WeekKey, u32>> = HashMap::new();

    for (assignment, timestamp) in entries {
        let Some(topic_id) = assignment.topic_id() else {
            continue;
        };
        *buckets
            .entry(topic_id)
            .or_default()
            .entry(week_key(timestamp))
            .or_insert(0) += 1;
    }

    let mut trends = HashMap::with_capacity(buckets.len());
    for (topic_id, weeks) in buckets {
        if weeks.len() < 2 {
            debug!(topic = %topic_id, "Single week of history, no trend");
            continue;
        }

        // BTreeMap iteration is chronological
        let (Some(first), Some(last)) = (weeks.values().next(), weeks.values().next_back()) else {
            continue;
        };
        trends.insert(topic_id, growth_rate(*first, *last));
    }

    trends
}

/// `(last - first) / max(1, first)`, rounded to 3 decimals.
pub fn growth_rate(first: u32, last: u32) -> f64 {
    let first = f64::from(first);
    let last = f64::from(last);
    round_to((last - first) / first.max(1.0), TREND_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn topic(id: u32) -> TopicAssignment {
        TopicAssignment::Cluster(TopicId::new(id))
    }

    /// Monday 2026-01-05, start of ISO week 2026-W02.
    fn week_start(offset_weeks: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap() + Duration::weeks(offset_weeks)
    }

    fn repeated(assignment: TopicAssignment, at: DateTime<Utc>, count: usize) -> Vec<(TopicAssignment, DateTime<Utc>)> {
        vec![(assignment, at); count]
    }

    #[test]
    fn test_growth_rate_examples() {
        assert_eq!(growth_rate(5, 20), 3.0);
        assert_eq!(growth_rate(0, 4), 4.0);
        assert_eq!(growth_rate(3, 1), -0.667);
    }

    #[test]
    fn test_five_to_twenty() {
        let mut entries = repeated(topic(1), week_start(0), 5);
        entries.extend(repeated(topic(1), week_start(1), 20));

        let trends = estimate_trends(&entries);
        assert_eq!(trends.get(&TopicId::new(1)), Some(&3.0));
    }

    #[test]
    fn test_single_week_absent() {
        let mut entries = repeated(topic(1), week_start(0), 3);
        // Same ISO week, different day
        entries.push((topic(1), week_start(0) + Duration::days(4)));
        entries.extend(repeated(topic(2), week_start(0), 1));
        entries.extend(repeated(topic(2), week_start(3), 2));

        let trends = estimate_trends(&entries);
        assert!(!trends.contains_key(&TopicId::new(1)));
        assert_eq!(trends.get(&TopicId::new(2)), Some(&1.0));
    }

    #[test]
    fn test_unsorted_input_is_chronological() {
        // Latest week scanned first
        let mut entries = repeated(topic(1), week_start(4), 8);
        entries.extend(repeated(topic(1), week_start(0), 2));
        entries.extend(repeated(topic(1), week_start(2), 50));

        let trends = estimate_trends(&entries);
        assert_eq!(trends.get(&TopicId::new(1)), Some(&3.0));
    }

    #[test]
    fn test_noise_ignored() {
        let mut entries = repeated(TopicAssignment::Noise, week_start(0), 4);
        entries.extend(repeated(TopicAssignment::Noise, week_start(1), 9));

        assert!(estimate_trends(&entries).is_empty());
    }

    #[test]
    fn test_iso_week_spans_year_boundary() {
        // 2026-01-01 is a Thursday in ISO week 2026-W01; 2025-12-29 is its Monday
        let monday = Utc.with_ymd_and_hms(2025, 12, 29, 8, 0, 0).unwrap();
        let thursday = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        assert_eq!(week_key(&monday), week_key(&thursday));
        assert_eq!(week_key(&thursday), (2026, 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(estimate_trends(&[]).is_empty());
    }
}
