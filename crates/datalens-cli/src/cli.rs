//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Datalens: question-driven analysis of tabular datasets
#[derive(Parser)]
#[command(name = "datalens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a dataset and produce a report
    Analyze {
        /// Path to the analysis request (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Research question (overrides the one in the request)
        #[arg(short, long)]
        question: Option<String>,

        /// Path to a configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the full report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show inferred column types and validation findings
    Inspect {
        /// Path to the analysis request (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path to a configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
