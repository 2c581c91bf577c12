//! # opportunity-nlp
//!
//! Text-level collaborators of the opportunity pipeline.
//!
//! The pipeline core never looks at raw text. It talks to two services
//! defined here as traits, so callers can swap in fakes or remote models:
//!
//! ## Features
//! - `SentimentAnalyzer`: per-document polarity and complaint intensity,
//!   with a VADER-backed default
//! - `TopicAssigner`: per-document cluster labels and per-topic keywords,
//!   with a TF-IDF + k-means default
//! - Static keyword and category reference data for filtering and reports

pub mod assigner;
pub mod config;
pub mod error;
pub mod keywords;
pub mod kmeans;
pub mod sentiment;
pub mod text;
pub mod tfidf;

pub use assigner::{KMeansTopicAssigner, TopicAssigner, TopicModel};
pub use config::TopicModelConfig;
pub use keywords::{categorize, is_opportunity, is_pain_point, is_tracked_source};
pub use error::NlpError;
pub use sentiment::{SentimentAnalyzer, VaderSentimentAnalyzer, NEGATIVE_KEYWORDS};
pub use tfidf::TfIdf;
