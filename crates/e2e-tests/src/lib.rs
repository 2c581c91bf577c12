//! End-to-end test infrastructure for the opportunity pipeline.
//!
//! Provides a shared TestHarness that owns a temporary post store, fixture
//! corpus builders and scripted collaborators for E2E tests covering the
//! full load-to-rank pipeline.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use opportunity_engine::{OpportunityPipeline, PipelineConfig};
use opportunity_ingest::JsonlPostStore;
use opportunity_nlp::{
    KMeansTopicAssigner, NlpError, SentimentAnalyzer, TopicAssigner, TopicModel,
    VaderSentimentAnalyzer,
};
use opportunity_types::{SentimentResult, TopicAssignment, TopicId};

/// A stored post as the collector writes it.
#[derive(Debug, Clone, Serialize)]
pub struct PostFixture {
    pub post_id: String,
    pub subreddit: String,
    pub title: String,
    pub processed_text: String,
    pub created_utc: String,
    pub preprocessed: bool,
    pub is_candidate: bool,
}

impl PostFixture {
    /// A ready candidate post created at `created`.
    pub fn candidate(
        post_id: impl Into<String>,
        subreddit: &str,
        text: &str,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            subreddit: subreddit.to_string(),
            title: text.chars().take(40).collect(),
            processed_text: text.to_string(),
            created_utc: created.format("%Y-%m-%dT%H:%M:%S").to_string(),
            preprocessed: true,
            is_candidate: true,
        }
    }

    /// Mark the post as not selected by the candidate filter.
    pub fn not_candidate(mut self) -> Self {
        self.is_candidate = false;
        self
    }
}

/// Shared test harness for E2E tests.
///
/// Owns a temp directory holding a JSON-lines post store.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Path of the post store file
    pub posts_path: PathBuf,
}

impl TestHarness {
    /// Create a new harness with an empty temp directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let posts_path = temp_dir.path().join("posts.jsonl");
        Self {
            _temp_dir: temp_dir,
            posts_path,
        }
    }

    /// Write posts to the store, one JSON object per line.
    pub fn write_posts(&self, posts: &[PostFixture]) {
        let lines: Vec<String> = posts
            .iter()
            .map(|p| serde_json::to_string(p).expect("Failed to serialize post"))
            .collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.write_lines(&refs);
    }

    /// Write raw lines to the store.
    pub fn write_lines(&self, lines: &[&str]) {
        let mut file =
            std::fs::File::create(&self.posts_path).expect("Failed to create post store");
        for line in lines {
            writeln!(file, "{}", line).expect("Failed to write post line");
        }
    }

    /// Post store over the harness file.
    pub fn store(&self) -> JsonlPostStore {
        JsonlPostStore::new(&self.posts_path)
    }

    /// Pipeline over the harness store with the default collaborators.
    pub fn default_pipeline(&self, config: PipelineConfig) -> OpportunityPipeline {
        OpportunityPipeline::new(
            Arc::new(self.store()),
            Arc::new(VaderSentimentAnalyzer::new()),
            Arc::new(KMeansTopicAssigner::default()),
            config,
        )
    }

    /// Pipeline over the harness store with the given collaborators.
    pub fn pipeline_with(
        &self,
        analyzer: Arc<dyn SentimentAnalyzer>,
        assigner: Arc<dyn TopicAssigner>,
        config: PipelineConfig,
    ) -> OpportunityPipeline {
        OpportunityPipeline::new(Arc::new(self.store()), analyzer, assigner, config)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Monday 2026-01-05 10:00 UTC plus a number of weeks.
pub fn week(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap() + Duration::weeks(offset)
}

/// Complaint posts about three unrelated themes.
///
/// - housing: 2 posts in week 0, 6 in week 1 (growing, very negative)
/// - jobs: 3 posts in week 0, 3 in week 1 (flat)
/// - commute: 2 posts, all in week 0 (no trend)
pub fn complaint_corpus() -> Vec<PostFixture> {
    let housing = [
        "landlord kept my deposit and ignores rent receipts",
        "landlord refuses deposit refund after apartment inspection",
        "apartment rent raised again and landlord ignores repairs",
        "deposit stuck with landlord for months apartment vacated",
        "landlord demands rent increase apartment repairs pending",
        "rent apartment landlord deposit scam horrible experience",
        "terrible landlord never returns deposit apartment rent",
        "apartment deposit landlord rent dispute awful",
    ];
    let jobs = [
        "salary offer after interview was too low",
        "interview went well but salary negotiation failed",
        "recruiter ghosted after final interview salary talk",
        "salary hike denied after interview cycle",
        "interview offer salary below market",
        "offer letter salary interview delayed",
    ];
    let commute = [
        "commute traffic bus always late",
        "bus commute traffic jam every morning",
    ];

    let mut posts = Vec::new();
    for (i, text) in housing.iter().enumerate() {
        let created = if i < 2 { week(0) } else { week(1) };
        posts.push(PostFixture::candidate(format!("h{i}"), "renting", text, created));
    }
    for (i, text) in jobs.iter().enumerate() {
        let created = if i < 3 { week(0) } else { week(1) };
        posts.push(PostFixture::candidate(format!("j{i}"), "jobs", text, created));
    }
    for (i, text) in commute.iter().enumerate() {
        posts.push(PostFixture::candidate(format!("c{i}"), "india", text, week(0)));
    }
    posts
}

/// Sentiment analyzer that reads scores from a text -> compound table.
///
/// Unknown texts score 0.0.
pub struct ScriptedAnalyzer {
    scores: HashMap<String, f64>,
}

impl ScriptedAnalyzer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores
                .iter()
                .map(|(text, score)| (text.to_string(), *score))
                .collect(),
        }
    }
}

impl SentimentAnalyzer for ScriptedAnalyzer {
    fn analyze(&self, text: &str) -> Result<SentimentResult, NlpError> {
        let compound = self.scores.get(text).copied().unwrap_or(0.0);
        Ok(SentimentResult::from_compound(compound))
    }
}

/// Topic assigner that returns fixed raw labels and keywords.
pub struct ScriptedAssigner {
    labels: Vec<i64>,
    keywords: HashMap<TopicId, Vec<String>>,
}

impl ScriptedAssigner {
    pub fn new(labels: &[i64]) -> Self {
        Self {
            labels: labels.to_vec(),
            keywords: HashMap::new(),
        }
    }

    pub fn with_keywords(mut self, topic: u32, words: &[&str]) -> Self {
        self.keywords.insert(
            TopicId::new(topic),
            words.iter().map(|w| w.to_string()).collect(),
        );
        self
    }
}

impl TopicAssigner for ScriptedAssigner {
    fn assign(&self, texts: &[&str], _n_topics: usize) -> Result<TopicModel, NlpError> {
        if texts.is_empty() {
            return Err(NlpError::EmptyCorpus);
        }
        let assignments = self
            .labels
            .iter()
            .map(|&label| {
                TopicAssignment::from_label(label)
                    .map_err(|e| NlpError::Clustering(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TopicModel {
            assignments,
            keywords: self.keywords.clone(),
        })
    }
}

/// Topic assigner that always fails.
pub struct FailingAssigner;

impl TopicAssigner for FailingAssigner {
    fn assign(&self, _texts: &[&str], _n_topics: usize) -> Result<TopicModel, NlpError> {
        Err(NlpError::Clustering("too few documents".to_string()))
    }
}
