//! Opportunity pipeline batch job.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (run, categories, classify)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    classify_text, list_categories, render_categories, render_report, run_pipeline, write_export,
    RunOverrides,
};
