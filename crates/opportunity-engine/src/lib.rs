//! # opportunity-engine
//!
//! Turns analyzed documents into ranked business opportunities.
//!
//! Stages, in run order:
//! - [`trend::estimate_trends`]: weekly growth rate per topic
//! - [`aggregate::aggregate`]: per-topic demand and mean sentiment
//! - [`scorer::OpportunityScorer`]: normalized, weighted, stably ranked scores
//! - [`pipeline::OpportunityPipeline`]: sequences the stages over injected
//!   collaborators and emits the ranked list
//!
//! Every stage is a pure function of its inputs; a run is all-or-nothing.

pub mod aggregate;
pub mod pipeline;
pub mod scorer;
pub mod trend;

pub use aggregate::aggregate;
pub use pipeline::{OpportunityPipeline, PipelineConfig, PipelineReport, PipelineStage};
pub use scorer::{normalize, OpportunityScorer, RankedTopic};
pub use trend::{estimate_trends, week_key, WeekKey};
