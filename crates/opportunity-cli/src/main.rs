//! Opportunity pipeline
//!
//! Ranks business opportunities mined from stored social-media posts.
//!
//! # Usage
//!
//! ```bash
//! opportunity-pipeline run [--input PATH] [--limit N] [--topics K] [--top N] [--output FILE]
//! opportunity-pipeline categories
//! opportunity-pipeline classify "TEXT" [--source CHANNEL]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/opportunity-radar/config.toml)
//! 3. Environment variables (OPPORTUNITY_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use opportunity_cli::{classify_text, list_categories, run_pipeline, Cli, Commands, RunOverrides};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            limit,
            topics,
            top,
            competition,
            output,
        } => {
            let overrides = RunOverrides {
                input,
                limit,
                topics,
                top,
                competition,
                output,
            };
            run_pipeline(cli.config.as_deref(), cli.log_level.as_deref(), overrides)?;
        }
        Commands::Categories => {
            list_categories();
        }
        Commands::Classify { text, source } => {
            print!("{}", classify_text(&text, source.as_deref()));
        }
    }

    Ok(())
}
