//! Analyze command - run the full pipeline and print or save the report.

use std::fs;
use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use datalens::{AnalysisCoordinator, AnalysisReport, Confidence};

use super::{load_config, read_context};

pub fn run(
    input: PathBuf,
    question: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = read_context(&input)?;
    if let Some(q) = question {
        context.research_question = q;
    }
    let config = load_config(config)?;

    if !json_output {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            input.display().to_string().white()
        );
    }

    let report = AnalysisCoordinator::with_config(config).analyze(&context);

    if let Some(ref path) = output {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!(
        "Question: {}",
        report.context.research_question.white().bold()
    );
    println!("Confidence: {}", paint(report.confidence));

    if !report.results.is_empty() {
        println!();
        println!("{}", "Results:".yellow().bold());
        for result in &report.results {
            println!(
                "  {:30} {:8} {}",
                result.title,
                paint(result.confidence),
                result.description
            );
        }
    }

    println!();
    println!("{}", "Insights:".yellow().bold());
    for insight in &report.insights {
        println!("  - {}", insight);
    }

    println!();
    println!("{}", "Recommendations:".yellow().bold());
    for recommendation in &report.recommendations {
        println!("  - {}", recommendation);
    }

    let quality = &report.data_quality;
    println!();
    println!(
        "Data quality: {:.1}% complete, {} errors, {} warnings",
        quality.completeness,
        quality.errors.len().to_string().red(),
        quality.warnings.len().to_string().yellow()
    );
    for error in &quality.errors {
        println!("  {} {}", "error:".red(), error);
    }
    for warning in &quality.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }

    println!();
    println!("{}", "SQL preview:".yellow().bold());
    for line in report.sql_preview.lines() {
        println!("  {}", line.cyan());
    }
}

fn paint(confidence: Confidence) -> ColoredString {
    match confidence {
        Confidence::High => confidence.label().green(),
        Confidence::Medium => confidence.label().yellow(),
        Confidence::Low => confidence.label().red(),
    }
}
