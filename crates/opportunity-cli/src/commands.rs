//! Command implementations for the opportunity pipeline.
//!
//! `run` builds the default collaborators, runs the pipeline once and prints
//! the ranked opportunities. Failures propagate to `main`, which exits
//! non-zero; a rerun from scratch is the recovery path.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use opportunity_engine::{OpportunityPipeline, PipelineConfig, PipelineReport};
use opportunity_ingest::JsonlPostStore;
use opportunity_nlp::keywords::{
    categorize, category_names, category_terms, is_opportunity, is_pain_point, is_tracked_source,
};
use opportunity_nlp::{KMeansTopicAssigner, TopicModelConfig, VaderSentimentAnalyzer};
use opportunity_types::{OpportunityScore, Settings};
use tracing::info;

/// CLI overrides for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub input: Option<String>,
    pub limit: Option<usize>,
    pub topics: Option<usize>,
    pub top: Option<usize>,
    pub competition: Option<f64>,
    pub output: Option<String>,
}

impl RunOverrides {
    /// Apply overrides on top of loaded settings (highest precedence).
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.input_path = input.clone();
        }
        if let Some(limit) = self.limit {
            settings.fetch_limit = limit;
        }
        if let Some(topics) = self.topics {
            settings.n_topics = topics;
        }
        if let Some(top) = self.top {
            settings.top_n = top;
        }
        if let Some(competition) = self.competition {
            settings.competition_default = competition;
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }
    }
}

/// Run the pipeline once.
///
/// 1. Load configuration (defaults -> file -> env -> CLI)
/// 2. Initialize logging
/// 3. Run the pipeline over the post store
/// 4. Print the report and optionally export the ranking
pub fn run_pipeline(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    overrides: RunOverrides,
) -> Result<()> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    overrides.apply(&mut settings);
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    settings
        .validate()
        .context("Invalid configuration after CLI overrides")?;

    // Logs go to stderr so the report on stdout stays clean
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let input_path = settings.expanded_input_path();
    info!(input = %input_path.display(), "Opportunity pipeline starting");

    let pipeline = OpportunityPipeline::new(
        Arc::new(JsonlPostStore::new(&input_path)),
        Arc::new(VaderSentimentAnalyzer::new()),
        Arc::new(KMeansTopicAssigner::new(
            TopicModelConfig::default().with_top_keywords(settings.top_keywords),
        )),
        PipelineConfig::from_settings(&settings),
    );

    let report = pipeline
        .run()
        .with_context(|| format!("Pipeline run failed for {}", input_path.display()))?;

    print!("{}", render_report(&report));

    if let Some(path) = settings.expanded_output_path() {
        write_export(&report.opportunities, &path)?;
        info!(path = %path.display(), "Wrote ranked opportunities");
    }

    Ok(())
}

/// Render a report as human-readable text.
pub fn render_report(report: &PipelineReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Run {}", report.run_id);
    let _ = writeln!(
        out,
        "Documents: {} ({} noise), topics scored: {}",
        report.documents, report.noise_documents, report.topics
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "TOP OPPORTUNITIES");
    let _ = writeln!(out);

    for opportunity in &report.opportunities {
        let _ = writeln!(out, "Topic ID: {}", opportunity.topic_id);
        let _ = writeln!(out, "Score: {}", opportunity.score);
        let _ = writeln!(out, "Volume: {}", opportunity.demand);
        let _ = writeln!(out, "Trend: {:.2}", opportunity.trend);
        let _ = writeln!(out, "Keywords: {}", opportunity.keywords.join(", "));
        let _ = writeln!(out, "Category: {}", category_of(opportunity).unwrap_or("Uncategorized"));
        let _ = writeln!(out, "{}", "-".repeat(40));
    }

    out
}

/// Dominant category of an opportunity's keywords.
fn category_of(opportunity: &OpportunityScore) -> Option<&'static str> {
    categorize(&opportunity.keywords.join(" "))
}

/// Write the ranked list as pretty JSON, creating parent directories.
pub fn write_export(opportunities: &[OpportunityScore], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(opportunities)
        .context("Failed to serialize opportunities")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Print the reference categories and their trigger terms.
pub fn list_categories() {
    print!("{}", render_categories());
}

/// One line per category: padded name, then its trigger terms.
pub fn render_categories() -> String {
    let mut out = String::new();
    for name in category_names() {
        let terms = category_terms(name).unwrap_or_default();
        let _ = writeln!(out, "{:<16} {}", name, terms.join(", "));
    }
    out
}

/// Keyword checks for one post, one `key: value` line each.
pub fn classify_text(text: &str, source: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "category: {}", categorize(text).unwrap_or("Uncategorized"));
    let _ = writeln!(out, "pain_point: {}", is_pain_point(text));
    let _ = writeln!(out, "opportunity: {}", is_opportunity(text));
    if let Some(source) = source {
        let _ = writeln!(out, "tracked_source: {}", is_tracked_source(source));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_types::TopicId;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn report() -> PipelineReport {
        PipelineReport {
            run_id: "01HZX3J6Q9K8M7N6P5R4S3T2V1".to_string(),
            documents: 12,
            noise_documents: 2,
            topics: 2,
            opportunities: vec![
                OpportunityScore {
                    topic_id: TopicId::new(0),
                    score: 0.8667,
                    demand: 7,
                    trend: 1.0,
                    keywords: vec!["landlord".into(), "deposit".into(), "rent".into()],
                },
                OpportunityScore {
                    topic_id: TopicId::new(1),
                    score: 0.3,
                    demand: 3,
                    trend: -0.333,
                    keywords: vec!["sunset".into()],
                },
            ],
        }
    }

    #[test]
    fn test_overrides_apply() {
        let mut settings = Settings::default();
        let overrides = RunOverrides {
            input: Some("/tmp/posts.jsonl".to_string()),
            limit: Some(50),
            topics: Some(3),
            top: Some(0),
            competition: Some(0.8),
            output: Some("/tmp/out.json".to_string()),
        };
        overrides.apply(&mut settings);

        assert_eq!(settings.input_path, "/tmp/posts.jsonl");
        assert_eq!(settings.fetch_limit, 50);
        assert_eq!(settings.n_topics, 3);
        assert_eq!(settings.top_n, 0);
        assert_eq!(settings.competition_default, 0.8);
        assert_eq!(settings.output_path.as_deref(), Some("/tmp/out.json"));
    }

    #[test]
    fn test_empty_overrides_keep_settings() {
        let mut settings = Settings::default();
        RunOverrides::default().apply(&mut settings);
        assert_eq!(settings.fetch_limit, 500);
        assert_eq!(settings.n_topics, 12);
        assert_eq!(settings.top_n, 5);
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&report());

        assert!(text.contains("Documents: 12 (2 noise), topics scored: 2"));
        assert!(text.contains("Topic ID: 0\nScore: 0.8667\nVolume: 7\nTrend: 1.00\n"));
        assert!(text.contains("Keywords: landlord, deposit, rent\nCategory: Housing\n"));
        assert!(text.contains("Trend: -0.33\n"));
        assert!(text.contains("Category: Uncategorized\n"));
    }

    #[test]
    fn test_render_categories() {
        let text = render_categories();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("Career           job, career"));
        assert!(lines[7].starts_with("Housing          rent, apartment"));
    }

    #[test]
    fn test_classify_text() {
        let text = classify_text(
            "Landlord kept my deposit, I would pay for a tool that tracks it",
            Some("renting"),
        );
        assert_eq!(
            text,
            "category: Housing\npain_point: false\nopportunity: true\ntracked_source: true\n"
        );
    }

    #[test]
    fn test_classify_without_source() {
        let text = classify_text("so frustrating", None);
        assert_eq!(text, "category: Uncategorized\npain_point: true\nopportunity: false\n");
    }

    #[test]
    fn test_write_export_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ranked.json");

        write_export(&report().opportunities, &path).unwrap();

        let written: Vec<OpportunityScore> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report().opportunities);
    }
}
