//! Opportunity pipeline orchestration.
//!
//! Runs ingestion, sentiment analysis, topic assignment, trend estimation,
//! aggregation and scoring strictly in sequence over one document batch.
//! Each stage consumes the full output of the previous one; any failure
//! aborts the run with no partial output.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use opportunity_ingest::{DocumentSource, IngestError};
use opportunity_nlp::{NlpError, SentimentAnalyzer, TopicAssigner};
use opportunity_types::{
    Competition, OpportunityError, OpportunityScore, ScoringWeights, Settings, TopicAssignment,
    DEFAULT_FETCH_LIMIT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use ulid::Ulid;

use crate::aggregate::aggregate;
use crate::scorer::OpportunityScorer;
use crate::trend::estimate_trends;

/// Number of sample documents logged at debug level.
const SAMPLE_DOCUMENTS: usize = 5;

/// Stages of a pipeline run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Candidate documents fetched
    Loaded,
    /// Sentiment computed per document
    Scored,
    /// Topics assigned over the batch
    Clustered,
    /// Weekly growth computed per topic
    TrendEstimated,
    /// Per-topic statistics folded
    Aggregated,
    /// Topics scored and sorted
    Ranked,
    /// Ranked list truncated and returned
    Emitted,
}

impl PipelineStage {
    /// Returns the display name for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Loaded => "loaded",
            PipelineStage::Scored => "scored",
            PipelineStage::Clustered => "clustered",
            PipelineStage::TrendEstimated => "trend_estimated",
            PipelineStage::Aggregated => "aggregated",
            PipelineStage::Ranked => "ranked",
            PipelineStage::Emitted => "emitted",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum candidate documents fetched
    pub fetch_limit: usize,
    /// Clusters requested from the topic assigner
    pub n_topics: usize,
    /// Opportunities emitted (0 = all)
    pub top_n: usize,
    /// Factor weights for scoring
    pub weights: ScoringWeights,
    /// Competition level per topic
    pub competition: Competition,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            n_topics: 12,
            top_n: 5,
            weights: ScoringWeights::default(),
            competition: Competition::default(),
        }
    }
}

impl PipelineConfig {
    /// Build a run configuration from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fetch_limit: settings.fetch_limit,
            n_topics: settings.n_topics,
            top_n: settings.top_n,
            weights: settings.weights,
            competition: settings.competition(),
        }
    }

    /// Set the fetch limit.
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Set the requested cluster count.
    pub fn with_n_topics(mut self, n_topics: usize) -> Self {
        self.n_topics = n_topics;
        self
    }

    /// Set the number of emitted opportunities (0 = all).
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the competition input.
    pub fn with_competition(mut self, competition: Competition) -> Self {
        self.competition = competition;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), OpportunityError> {
        if self.fetch_limit == 0 {
            return Err(OpportunityError::Config(
                "fetch_limit must be greater than zero".to_string(),
            ));
        }
        if self.n_topics == 0 {
            return Err(OpportunityError::Config(
                "n_topics must be greater than zero".to_string(),
            ));
        }
        self.weights.validate().map_err(OpportunityError::Config)?;
        self.competition.validate().map_err(OpportunityError::Config)?;
        Ok(())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Run identifier (ULID)
    pub run_id: String,
    /// Documents loaded
    pub documents: usize,
    /// Documents labelled as noise
    pub noise_documents: usize,
    /// Topics that were scored
    pub topics: usize,
    /// Ranked opportunities, best first, truncated to `top_n`
    pub opportunities: Vec<OpportunityScore>,
}

/// The opportunity detection pipeline.
///
/// Collaborators are injected, so tests can substitute fakes.
pub struct OpportunityPipeline {
    source: Arc<dyn DocumentSource>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    assigner: Arc<dyn TopicAssigner>,
    scorer: OpportunityScorer,
    config: PipelineConfig,
}

impl OpportunityPipeline {
    /// Create a new pipeline.
    pub fn new(
        source: Arc<dyn DocumentSource>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        assigner: Arc<dyn TopicAssigner>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            analyzer,
            assigner,
            scorer: OpportunityScorer::new(config.weights),
            config,
        }
    }

    /// Run configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline once over a fresh document batch.
    pub fn run(&self) -> Result<PipelineReport, OpportunityError> {
        self.config.validate()?;

        let run_id = Ulid::new();
        let span = info_span!("pipeline_run", run_id = %run_id);
        let _guard = span.enter();

        info!(
            fetch_limit = self.config.fetch_limit,
            n_topics = self.config.n_topics,
            "Starting opportunity pipeline"
        );

        let documents = self
            .source
            .fetch_candidate_documents(self.config.fetch_limit)
            .map_err(ingest_failure)?;
        if documents.is_empty() {
            return Err(OpportunityError::EmptyInput(
                "no candidate documents to process".to_string(),
            ));
        }
        for doc in documents.iter().take(SAMPLE_DOCUMENTS) {
            debug!(
                id = %doc.id,
                source = %doc.source,
                title = doc.title.as_deref().unwrap_or(""),
                text = %doc.preview(200),
                "Sample document"
            );
        }
        stage(PipelineStage::Loaded, documents.len());

        let texts: Vec<&str> = documents.iter().map(|d| d.processed_text.as_str()).collect();

        let sentiments = self
            .analyzer
            .analyze_batch(&texts)
            .map_err(|e| nlp_failure("sentiment analysis", e))?;
        ensure_aligned("sentiment analyzer", sentiments.len(), texts.len())?;
        let negative = sentiments.iter().filter(|s| s.is_negative()).count();
        debug!(negative, "Negative documents");
        stage(PipelineStage::Scored, sentiments.len());

        let model = self
            .assigner
            .assign(&texts, self.config.n_topics)
            .map_err(|e| nlp_failure("topic assignment", e))?;
        ensure_aligned("topic assigner", model.assignments.len(), texts.len())?;
        let noise_documents = model.noise_count();
        stage(PipelineStage::Clustered, model.keywords.len());

        let dated: Vec<(TopicAssignment, DateTime<Utc>)> = model
            .assignments
            .iter()
            .copied()
            .zip(documents.iter().map(|d| d.created_at))
            .collect();
        let trends = estimate_trends(&dated);
        stage(PipelineStage::TrendEstimated, trends.len());

        let stats = aggregate(
            &model.assignments,
            &sentiments,
            &trends,
            &self.config.competition,
        )?;
        stage(PipelineStage::Aggregated, stats.len());

        let ranked = self.scorer.score(&stats)?;
        stage(PipelineStage::Ranked, ranked.len());

        let limit = match self.config.top_n {
            0 => ranked.len(),
            n => n,
        };
        let opportunities = ranked
            .iter()
            .take(limit)
            .map(|entry| {
                let topic = stats.get(entry.topic_id).ok_or_else(|| {
                    OpportunityError::InvalidInput(format!(
                        "ranked topic {} missing from statistics",
                        entry.topic_id
                    ))
                })?;
                Ok(OpportunityScore {
                    topic_id: entry.topic_id,
                    score: entry.score,
                    demand: topic.demand.get(),
                    trend: topic.trend,
                    keywords: model.keywords_for(entry.topic_id).to_vec(),
                })
            })
            .collect::<Result<Vec<_>, OpportunityError>>()?;
        stage(PipelineStage::Emitted, opportunities.len());

        info!(
            documents = documents.len(),
            noise = noise_documents,
            topics = stats.len(),
            emitted = opportunities.len(),
            "Pipeline completed"
        );

        Ok(PipelineReport {
            run_id: run_id.to_string(),
            documents: documents.len(),
            noise_documents,
            topics: stats.len(),
            opportunities,
        })
    }
}

fn stage(stage: PipelineStage, items: usize) {
    info!(stage = %stage, items, "Stage complete");
}

fn ensure_aligned(collaborator: &str, got: usize, expected: usize) -> Result<(), OpportunityError> {
    if got != expected {
        return Err(OpportunityError::Collaborator(format!(
            "{collaborator} returned {got} results for {expected} documents"
        )));
    }
    Ok(())
}

fn ingest_failure(error: IngestError) -> OpportunityError {
    OpportunityError::Collaborator(format!("ingestion failed: {error}"))
}

fn nlp_failure(stage: &str, error: NlpError) -> OpportunityError {
    OpportunityError::Collaborator(format!("{stage} failed: {error}"))
}
