//! Configuration loading for the opportunity pipeline.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at `<config dir>/opportunity-radar/config.toml`.

use config::{Config, Environment, File};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::OpportunityError;
use crate::scoring::{
    default_competition, default_competition_weight, default_demand_weight,
    default_sentiment_weight, default_trend_weight, Competition, ScoringWeights,
};

const APP_NAME: &str = "opportunity-radar";

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the JSON-lines post store
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Maximum number of candidate documents loaded per run
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Number of clusters requested from the topic assigner
    #[serde(default = "default_n_topics")]
    pub n_topics: usize,

    /// Number of opportunities emitted (0 = all)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Keywords kept per topic
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    /// Competition level assumed for every topic
    #[serde(default = "default_competition")]
    pub competition_default: f64,

    /// Opportunity factor weights
    #[serde(default)]
    pub weights: ScoringWeights,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional path for a JSON export of the ranking
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_input_path() -> String {
    ProjectDirs::from("", "", APP_NAME)
        .map(|p| p.data_local_dir().join("posts.jsonl"))
        .unwrap_or_else(|| PathBuf::from("./posts.jsonl"))
        .to_string_lossy()
        .to_string()
}

/// Documents loaded per run when no limit is configured.
pub const DEFAULT_FETCH_LIMIT: usize = 500;

fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn default_n_topics() -> usize {
    12
}

fn default_top_n() -> usize {
    5
}

fn default_top_keywords() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            fetch_limit: default_fetch_limit(),
            n_topics: default_n_topics(),
            top_n: default_top_n(),
            top_keywords: default_top_keywords(),
            competition_default: default_competition(),
            weights: ScoringWeights::default(),
            log_level: default_log_level(),
            output_path: None,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/opportunity-radar/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (OPPORTUNITY_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, OpportunityError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("input_path", default_input_path())
            .map_err(config_error)?
            .set_default("fetch_limit", default_fetch_limit() as i64)
            .map_err(config_error)?
            .set_default("n_topics", default_n_topics() as i64)
            .map_err(config_error)?
            .set_default("top_n", default_top_n() as i64)
            .map_err(config_error)?
            .set_default("top_keywords", default_top_keywords() as i64)
            .map_err(config_error)?
            .set_default("competition_default", default_competition())
            .map_err(config_error)?
            .set_default("weights.demand", default_demand_weight())
            .map_err(config_error)?
            .set_default("weights.sentiment", default_sentiment_weight())
            .map_err(config_error)?
            .set_default("weights.trend", default_trend_weight())
            .map_err(config_error)?
            .set_default("weights.competition", default_competition_weight())
            .map_err(config_error)?
            .set_default("log_level", default_log_level())
            .map_err(config_error)?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // OPPORTUNITY_FETCH_LIMIT, OPPORTUNITY_WEIGHTS__DEMAND, ...
        builder = builder.add_source(
            Environment::with_prefix("OPPORTUNITY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error)?;

        let settings: Settings = config.try_deserialize().map_err(config_error)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), OpportunityError> {
        self.weights.validate().map_err(OpportunityError::Config)?;
        self.competition()
            .validate()
            .map_err(OpportunityError::Config)?;
        if self.n_topics == 0 {
            return Err(OpportunityError::Config("n_topics must be > 0".to_string()));
        }
        if self.fetch_limit == 0 {
            return Err(OpportunityError::Config(
                "fetch_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Competition input derived from `competition_default`.
    pub fn competition(&self) -> Competition {
        Competition::uniform(self.competition_default)
    }

    /// Expand ~ in input_path to the home directory
    pub fn expanded_input_path(&self) -> PathBuf {
        expand_home(&self.input_path)
    }

    /// Expand ~ in output_path to the home directory
    pub fn expanded_output_path(&self) -> Option<PathBuf> {
        self.output_path.as_deref().map(expand_home)
    }
}

fn config_error(e: config::ConfigError) -> OpportunityError {
    OpportunityError::Config(e.to_string())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.fetch_limit, 500);
        assert_eq!(settings.n_topics, 12);
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.top_keywords, 10);
        assert!((settings.competition_default - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.log_level, "info");
        assert!(settings.output_path.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = Settings::load(None).unwrap();
        assert!(settings.n_topics > 0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(
            &path,
            "n_topics = 4\ntop_n = 3\ncompetition_default = 0.2\n\n[weights]\ndemand = 0.5\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(settings.n_topics, 4);
        assert_eq!(settings.top_n, 3);
        assert!((settings.competition_default - 0.2).abs() < f64::EPSILON);
        assert!((settings.weights.demand - 0.5).abs() < f64::EPSILON);
        assert!((settings.weights.trend - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_cli_file_fails() {
        let result = Settings::load(Some("/nonexistent/opportunity-config.toml"));
        assert!(matches!(result, Err(OpportunityError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.competition_default = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.n_topics = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.weights.sentiment = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_expand_home() {
        let settings = Settings {
            input_path: "/data/posts.jsonl".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.expanded_input_path(),
            PathBuf::from("/data/posts.jsonl")
        );
        if BaseDirs::new().is_some() {
            assert!(!expand_home("~/posts.jsonl").starts_with("~"));
        }
    }
}
