//! # opportunity-types
//!
//! Shared domain types for the opportunity detection pipeline.
//!
//! This crate defines the data structures passed between pipeline stages:
//! - Documents: preprocessed posts handed over by the ingestion layer
//! - Sentiment: per-document polarity and complaint intensity
//! - Topics: cluster assignments and per-topic aggregate statistics
//! - Scoring: factor weights, competition input and ranked opportunities
//! - Settings: layered configuration for the batch job
//!
//! ## Usage
//!
//! ```rust
//! use opportunity_types::{TopicAssignment, TopicId};
//!
//! let label = TopicAssignment::from_label(3).unwrap();
//! assert_eq!(label.topic_id(), Some(TopicId::new(3)));
//! assert!(TopicAssignment::from_label(-1).unwrap().is_noise());
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod scoring;
pub mod sentiment;
pub mod topic;

pub use config::{Settings, DEFAULT_FETCH_LIMIT};
pub use document::Document;
pub use error::OpportunityError;
pub use scoring::{round_to, Competition, OpportunityScore, ScoringWeights, NEUTRAL_COMPETITION};
pub use sentiment::SentimentResult;
pub use topic::{TopicAssignment, TopicId, TopicStats, TopicStatsTable, NOISE_LABEL};
