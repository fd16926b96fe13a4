//! Datalens CLI - question-driven analysis of tabular datasets.

mod cli;
mod commands;

use std::io;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use datalens::logging::{route_panics_to, TracingLogger};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    route_panics_to(Arc::new(TracingLogger));

    let result = match cli.command {
        Commands::Analyze {
            input,
            question,
            config,
            output,
            json,
        } => commands::analyze::run(input, question, config, output, json),

        Commands::Inspect { input, config } => commands::inspect::run(input, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
