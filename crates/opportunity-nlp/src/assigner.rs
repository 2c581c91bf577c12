//! Topic assignment for a document batch.
//!
//! Provides the `TopicAssigner` trait and a default implementation that
//! clusters TF-IDF document vectors with seeded k-means.

use std::collections::HashMap;

use opportunity_types::{TopicAssignment, TopicId};
use tracing::{debug, info};

use crate::config::TopicModelConfig;
use crate::error::NlpError;
use crate::kmeans::KMeans;
use crate::tfidf::TfIdf;

/// Output of topic assignment over a batch.
#[derive(Debug, Clone, Default)]
pub struct TopicModel {
    /// One assignment per input text, in input order
    pub assignments: Vec<TopicAssignment>,
    /// Keywords per non-noise topic, most representative first
    pub keywords: HashMap<TopicId, Vec<String>>,
}

impl TopicModel {
    /// Keywords of a topic, empty if unknown.
    pub fn keywords_for(&self, topic_id: TopicId) -> &[String] {
        self.keywords
            .get(&topic_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of documents labelled as noise.
    pub fn noise_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_noise()).count()
    }
}

/// Trait for batch topic assignment.
///
/// Clustering needs the whole batch at once, so there is no per-document
/// variant.
pub trait TopicAssigner: Send + Sync {
    /// Assign each text to a topic, asking for `n_topics` clusters.
    ///
    /// Fails on an empty batch.
    fn assign(&self, texts: &[&str], n_topics: usize) -> Result<TopicModel, NlpError>;
}

/// TF-IDF + k-means topic assigner.
///
/// Texts with no vocabulary terms after tokenization are noise. Cluster
/// labels are renumbered densely in order of first appearance.
pub struct KMeansTopicAssigner {
    config: TopicModelConfig,
}

impl KMeansTopicAssigner {
    /// Create a new assigner.
    pub fn new(config: TopicModelConfig) -> Self {
        Self { config }
    }
}

impl Default for KMeansTopicAssigner {
    fn default() -> Self {
        Self::new(TopicModelConfig::default())
    }
}

impl TopicAssigner for KMeansTopicAssigner {
    fn assign(&self, texts: &[&str], n_topics: usize) -> Result<TopicModel, NlpError> {
        if texts.is_empty() {
            return Err(NlpError::EmptyCorpus);
        }
        if n_topics == 0 {
            return Err(NlpError::InvalidInput(
                "n_topics must be greater than zero".to_string(),
            ));
        }

        let tfidf = TfIdf::new(texts);
        debug!(
            documents = tfidf.doc_count(),
            vocabulary = tfidf.dimension(),
            "Built TF-IDF vectors"
        );

        // Only documents with a vector take part in clustering
        let clustered: Vec<usize> = (0..texts.len())
            .filter(|&doc| !tfidf.vector(doc).is_empty())
            .collect();
        let points: Vec<&[(usize, f64)]> = clustered.iter().map(|&doc| tfidf.vector(doc)).collect();

        let fit = KMeans::new(n_topics, self.config.max_iterations, self.config.seed)
            .with_restarts(self.config.restarts)
            .fit(&points, tfidf.dimension());

        let mut assignments = vec![TopicAssignment::Noise; texts.len()];
        let mut renumbered: HashMap<usize, TopicId> = HashMap::new();
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (&doc, &cluster) in clustered.iter().zip(&fit.labels) {
            let next_id = renumbered.len() as u32;
            let topic_id = *renumbered.entry(cluster).or_insert_with(|| {
                members.push(Vec::new());
                TopicId::new(next_id)
            });
            members[topic_id.get() as usize].push(doc);
            assignments[doc] = TopicAssignment::Cluster(topic_id);
        }

        let keywords: HashMap<TopicId, Vec<String>> = members
            .iter()
            .enumerate()
            .map(|(index, docs)| {
                let terms = tfidf
                    .top_terms(docs, self.config.top_keywords)
                    .into_iter()
                    .map(|(term, _)| term)
                    .collect();
                (TopicId::new(index as u32), terms)
            })
            .collect();

        for (topic_id, words) in &keywords {
            debug!(topic = %topic_id, keywords = ?words, "topic keywords");
        }

        let model = TopicModel {
            assignments,
            keywords,
        };

        info!(
            documents = texts.len(),
            topics = members.len(),
            noise = model.noise_count(),
            iterations = fit.iterations,
            "Assigned topics"
        );

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "salary negotiation interview offer salary",
            "landlord deposit rent apartment",
            "interview offer salary hike",
            "rent landlord apartment deposit refund",
            "salary interview hiring offer",
            "apartment rent landlord",
        ]
    }

    #[test]
    fn test_empty_corpus_fails() {
        let assigner = KMeansTopicAssigner::default();
        assert!(matches!(assigner.assign(&[], 3), Err(NlpError::EmptyCorpus)));
    }

    #[test]
    fn test_zero_topics_fails() {
        let assigner = KMeansTopicAssigner::default();
        assert!(matches!(
            assigner.assign(&["rent landlord"], 0),
            Err(NlpError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_assignments_aligned_with_input() {
        let texts = corpus();
        let model = KMeansTopicAssigner::default().assign(&texts, 2).unwrap();
        assert_eq!(model.assignments.len(), texts.len());
    }

    #[test]
    fn test_separates_obvious_topics() {
        let texts = corpus();
        let model = KMeansTopicAssigner::default().assign(&texts, 2).unwrap();

        let jobs = model.assignments[0];
        let housing = model.assignments[1];
        assert!(!jobs.is_noise());
        assert_ne!(jobs, housing);
        assert_eq!(model.assignments[2], jobs);
        assert_eq!(model.assignments[4], jobs);
        assert_eq!(model.assignments[3], housing);
        assert_eq!(model.assignments[5], housing);
    }

    #[test]
    fn test_labels_dense_in_first_appearance_order() {
        let texts = corpus();
        let model = KMeansTopicAssigner::default().assign(&texts, 2).unwrap();
        assert_eq!(model.assignments[0], TopicAssignment::Cluster(TopicId::new(0)));
        assert_eq!(model.assignments[1], TopicAssignment::Cluster(TopicId::new(1)));
    }

    #[test]
    fn test_keywords_per_topic() {
        let texts = corpus();
        let config = TopicModelConfig::default().with_top_keywords(3);
        let model = KMeansTopicAssigner::new(config).assign(&texts, 2).unwrap();

        assert_eq!(model.keywords.len(), 2);
        let housing = model.assignments[1].topic_id().unwrap();
        let words = model.keywords_for(housing);
        assert!(words.len() <= 3);
        assert!(words.iter().any(|w| w == "landlord" || w == "rent" || w == "apartment"));
    }

    #[test]
    fn test_stop_word_only_text_is_noise() {
        let texts = vec!["rent landlord deposit", "the and of it", "rent apartment landlord"];
        let model = KMeansTopicAssigner::default().assign(&texts, 2).unwrap();
        assert!(model.assignments[1].is_noise());
        assert_eq!(model.noise_count(), 1);
        assert!(model.keywords_for(TopicId::new(99)).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let texts = corpus();
        let assigner = KMeansTopicAssigner::default();
        let a = assigner.assign(&texts, 3).unwrap();
        let b = assigner.assign(&texts, 3).unwrap();
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.keywords, b.keywords);
    }
}
