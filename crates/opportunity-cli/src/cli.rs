//! CLI argument parsing for the opportunity pipeline.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

/// Opportunity pipeline
///
/// Ranks business opportunities mined from stored social-media posts.
#[derive(Parser, Debug)]
#[command(name = "opportunity-pipeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/opportunity-radar/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pipeline commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once and print the top opportunities
    Run {
        /// Override the JSON-lines post store path
        #[arg(short, long)]
        input: Option<String>,

        /// Override the number of candidate posts loaded
        #[arg(long)]
        limit: Option<usize>,

        /// Override the number of topic clusters
        #[arg(short, long)]
        topics: Option<usize>,

        /// Number of opportunities to print (0 = all)
        #[arg(long)]
        top: Option<usize>,

        /// Competition level assumed for every topic (0.0-1.0)
        #[arg(long)]
        competition: Option<f64>,

        /// Write the ranked list as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the pain-point categories used to label topics
    Categories,

    /// Show how a post would be flagged by the keyword checks
    Classify {
        /// Post text
        text: String,

        /// Source channel, checked against the tracked list
        #[arg(short, long)]
        source: Option<String>,
    },
}
