//! Inspect command - show inferred column types and validation findings.

use std::path::PathBuf;

use colored::Colorize;
use datalens::input::Normalizer;
use datalens::validation::Severity;
use datalens::{AnalysisError, DataValidator, TypeInferenceEngine};

use super::{load_config, read_context};

pub fn run(input: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let context = read_context(&input)?;
    let config = load_config(config)?;
    let raw = context.primary_dataset().ok_or(AnalysisError::NoDatasets)?;

    let normalized = Normalizer::new(&config.inference).normalize(raw);
    let dataset = &normalized.dataset;
    let buckets = TypeInferenceEngine::with_config(config.inference.clone()).infer(dataset);
    let validator = DataValidator::with_config(&config.quality);

    println!(
        "{} {} ({} rows, {} columns)",
        "Dataset".cyan().bold(),
        dataset.name.white().bold(),
        dataset.row_count(),
        dataset.column_count()
    );

    println!();
    println!("{}", "Columns:".yellow().bold());
    for column in &dataset.columns {
        match buckets.find(&column.name) {
            Some(typed) => println!(
                "  {:24} {:8} {:12} {:>5.0}%  {}",
                column.name,
                column.storage_type.label(),
                typed.semantic_type.label(),
                typed.confidence * 100.0,
                typed.samples.join(", ").dimmed()
            ),
            None => println!(
                "  {:24} {:8} {}",
                column.name,
                column.storage_type.label(),
                "(no values)".dimmed()
            ),
        }
    }

    let hints = &normalized.hints;
    if !hints.identifier_columns.is_empty() {
        println!("Identifier-like: {}", hints.identifier_columns.join(", "));
    }
    if !hints.event_columns.is_empty() {
        println!("Event-like: {}", hints.event_columns.join(", "));
    }
    if !hints.date_columns.is_empty() {
        println!("Date-like: {}", hints.date_columns.join(", "));
    }

    let findings = validator.findings(dataset);
    println!();
    println!(
        "Completeness: {:.1}%",
        validator.completeness(dataset)
    );

    if findings.is_empty() && normalized.notes.is_empty() {
        println!("{}", "No issues found".green());
        return Ok(());
    }

    for finding in &findings {
        let label = match finding.severity {
            Severity::Error => finding.severity.label().red(),
            Severity::Warning => finding.severity.label().yellow(),
        };
        println!("  {:8} {}", label, finding.message);
    }
    for note in &normalized.notes {
        println!("  {:8} {}", "Note".blue(), note);
    }

    Ok(())
}
