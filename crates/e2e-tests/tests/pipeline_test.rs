//! Full pipeline E2E tests.
//!
//! Runs the pipeline from a JSON-lines post store on disk through ranking,
//! with the default collaborators and with scripted ones.

use std::collections::BTreeSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use e2e_tests::{
    complaint_corpus, week, FailingAssigner, PostFixture, ScriptedAnalyzer, ScriptedAssigner,
    TestHarness,
};
use opportunity_engine::PipelineConfig;
use opportunity_nlp::categorize;
use opportunity_types::{OpportunityError, Settings};

fn config() -> PipelineConfig {
    PipelineConfig::default().with_n_topics(3).with_top_n(0)
}

/// Default collaborators separate the three themes and rank the growing,
/// high-volume housing complaints first.
#[test]
fn test_default_collaborators_rank_housing_first() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus());

    let report = harness.default_pipeline(config()).run().unwrap();

    assert_eq!(report.documents, 16);
    assert_eq!(report.noise_documents, 0);
    assert_eq!(report.topics, 3);
    assert_eq!(report.opportunities.len(), 3);

    let categories: BTreeSet<&str> = report
        .opportunities
        .iter()
        .filter_map(|o| categorize(&o.keywords.join(" ")))
        .collect();
    assert_eq!(
        categories,
        BTreeSet::from(["Career", "Housing", "Transportation"])
    );

    let best = &report.opportunities[0];
    assert_eq!(categorize(&best.keywords.join(" ")), Some("Housing"));
    assert_eq!(best.demand, 8);
    // Weekly counts [2, 6]
    assert_eq!(best.trend, 2.0);

    for pair in report.opportunities.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for opportunity in &report.opportunities {
        assert!(opportunity.demand >= 1);
        assert!(!opportunity.keywords.is_empty());
        assert!(opportunity.keywords.len() <= 10);
    }
}

/// Identical input and collaborators give an identical ranking.
#[test]
fn test_rerun_is_idempotent() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus());

    let pipeline = harness.default_pipeline(config());
    let first = pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(first.opportunities, second.opportunities);
    assert_ne!(first.run_id, second.run_id);
}

/// Scores flow end to end from the store through scripted collaborators.
#[test]
fn test_scripted_scores_end_to_end() {
    let harness = TestHarness::new();
    harness.write_posts(&[
        PostFixture::candidate("a", "renting", "deposit gone", week(0)),
        PostFixture::candidate("b", "renting", "landlord rude", week(1)),
        PostFixture::candidate("c", "jobs", "nice weather", week(0)),
        PostFixture::candidate("d", "jobs", "salary low", week(0)),
    ]);

    let analyzer = ScriptedAnalyzer::new(&[
        ("deposit gone", 0.5),
        ("landlord rude", -0.3),
        ("nice weather", 0.9),
        ("salary low", 0.2),
    ]);
    let assigner = ScriptedAssigner::new(&[1, 1, -1, 2])
        .with_keywords(1, &["deposit", "landlord"])
        .with_keywords(2, &["salary"]);

    let report = harness
        .pipeline_with(Arc::new(analyzer), Arc::new(assigner), config())
        .run()
        .unwrap();

    assert_eq!(report.noise_documents, 1);
    assert_eq!(report.topics, 2);

    let ranked: Vec<(u32, f64, u32, f64)> = report
        .opportunities
        .iter()
        .map(|o| (o.topic_id.get(), o.score, o.demand, o.trend))
        .collect();
    // Flat weekly counts [1, 1] and a single-week topic: trend adds nothing
    // Topic 1: 0.35 * 1 + 0.25 * 0.1 + 0.15 * 0.5
    // Topic 2: 0.25 * 0.2 + 0.15 * 0.5
    assert_eq!(ranked, vec![(1, 0.45, 2, 0.0), (2, 0.125, 1, 0.0)]);
    assert_eq!(report.opportunities[0].keywords, vec!["deposit", "landlord"]);
}

/// Only the top N opportunities are emitted.
#[test]
fn test_top_n_truncation() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus());

    let report = harness
        .default_pipeline(config().with_top_n(1))
        .run()
        .unwrap();

    assert_eq!(report.topics, 3);
    assert_eq!(report.opportunities.len(), 1);
}

/// Non-candidate posts never reach the pipeline.
#[test]
fn test_no_candidates_is_empty_input() {
    let harness = TestHarness::new();
    let posts: Vec<PostFixture> = complaint_corpus()
        .into_iter()
        .map(PostFixture::not_candidate)
        .collect();
    harness.write_posts(&posts);

    let result = harness.default_pipeline(config()).run();
    assert!(matches!(result, Err(OpportunityError::EmptyInput(_))));
}

/// Malformed store lines are skipped, the rest still runs.
#[test]
fn test_malformed_lines_are_skipped() {
    let harness = TestHarness::new();
    let mut lines: Vec<String> = complaint_corpus()
        .iter()
        .map(|p| serde_json::to_string(p).unwrap())
        .collect();
    lines.insert(3, "{broken json".to_string());
    lines.push("[]".to_string());
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    harness.write_lines(&refs);

    let report = harness.default_pipeline(config()).run().unwrap();
    assert_eq!(report.documents, 16);
}

/// A missing post store aborts the run as a collaborator failure.
#[test]
fn test_missing_store_fails() {
    let harness = TestHarness::new();

    let result = harness.default_pipeline(config()).run();
    assert!(matches!(result, Err(OpportunityError::Collaborator(_))));
}

/// Topic assignment failure aborts the run.
#[test]
fn test_assigner_failure_propagates() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus());

    let result = harness
        .pipeline_with(
            Arc::new(ScriptedAnalyzer::new(&[])),
            Arc::new(FailingAssigner),
            config(),
        )
        .run();

    match result {
        Err(OpportunityError::Collaborator(message)) => {
            assert!(message.contains("topic assignment"), "got: {message}");
        }
        other => panic!("expected collaborator failure, got {other:?}"),
    }
}

/// A malformed noise label from the assigner is a collaborator failure.
#[test]
fn test_malformed_label_propagates() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus()[..2]);

    let result = harness
        .pipeline_with(
            Arc::new(ScriptedAnalyzer::new(&[])),
            Arc::new(ScriptedAssigner::new(&[0, -7])),
            config(),
        )
        .run();
    assert!(matches!(result, Err(OpportunityError::Collaborator(_))));
}

/// When every document is noise there is nothing to score.
#[test]
fn test_all_noise_is_empty_input() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus()[..3]);

    let result = harness
        .pipeline_with(
            Arc::new(ScriptedAnalyzer::new(&[])),
            Arc::new(ScriptedAssigner::new(&[-1, -1, -1])),
            config(),
        )
        .run();
    assert!(matches!(result, Err(OpportunityError::EmptyInput(_))));
}

/// Settings from a config file drive the run.
#[test]
fn test_settings_file_drives_run() {
    let harness = TestHarness::new();
    harness.write_posts(&complaint_corpus());

    let config_path = harness._temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "input_path = {:?}\nn_topics = 3\ntop_n = 2\nfetch_limit = 10\n",
            harness.posts_path.display().to_string()
        ),
    )
    .unwrap();

    let settings = Settings::load(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(settings.fetch_limit, 10);

    let report = harness
        .default_pipeline(PipelineConfig::from_settings(&settings))
        .run()
        .unwrap();
    assert_eq!(report.documents, 10);
    assert!(report.opportunities.len() <= 2);
}
