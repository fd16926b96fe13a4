//! Illustrative SQL shown alongside a report.
//!
//! The preview is display text only. It is never parsed or executed, so
//! identifiers are quoted for readability rather than correctness.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::input::{ColumnHints, Dataset};
use crate::question::QuestionProfile;

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

const TABLE_NAME: &str = "dataset";

/// One clause of the preview and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStep {
    pub clause: String,
    pub description: String,
}

impl QueryStep {
    fn new(clause: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            description: description.into(),
        }
    }
}

/// A preview query with a clause-by-clause explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlPreview {
    pub sql: String,
    pub breakdown: Vec<QueryStep>,
}

impl SqlPreview {
    /// Build the preview for a full analysis.
    pub fn build(
        dataset: &Dataset,
        hints: &ColumnHints,
        profile: &QuestionProfile,
        config: &ReportConfig,
    ) -> Self {
        let selected: Vec<String> = dataset
            .columns
            .iter()
            .take(config.sql_column_limit.max(1))
            .map(|c| quote_identifier(&c.name))
            .collect();

        let mut steps = Vec::new();

        if selected.is_empty() {
            steps.push(QueryStep::new("SELECT *", "Retrieve every column"));
        } else {
            steps.push(QueryStep::new(
                format!("SELECT {}", selected.join(", ")),
                format!("Retrieve the first {} columns of the dataset", selected.len()),
            ));
        }
        steps.push(QueryStep::new(
            format!("FROM {}", TABLE_NAME),
            "Read from the analyzed dataset",
        ));

        if profile.wants_recent {
            if let Some(date_column) = hints.date_columns.first() {
                steps.push(QueryStep::new(
                    format!(
                        "WHERE {} >= CURRENT_DATE - INTERVAL '{} days'",
                        quote_identifier(date_column),
                        config.recent_window_days
                    ),
                    format!(
                        "Keep only records from the last {} days",
                        config.recent_window_days
                    ),
                ));
            }
        }

        if let Some(first) = dataset.columns.first() {
            steps.push(QueryStep::new(
                format!("ORDER BY {}", quote_identifier(&first.name)),
                format!("Sort results by {}", first.name),
            ));
        }

        steps.push(QueryStep::new(
            format!("LIMIT {}", config.sql_row_limit),
            format!("Show at most {} rows", config.sql_row_limit),
        ));

        Self::from_steps(steps)
    }

    /// Preview for a row-count question.
    pub fn count() -> Self {
        Self::from_steps(vec![
            QueryStep::new("SELECT COUNT(*) AS record_count", "Count every record"),
            QueryStep::new(format!("FROM {}", TABLE_NAME), "Read from the analyzed dataset"),
        ])
    }

    /// Preview shown when the analysis could not run.
    pub fn fallback() -> Self {
        Self::from_steps(vec![
            QueryStep::new("SELECT *", "Retrieve every column"),
            QueryStep::new(format!("FROM {}", TABLE_NAME), "Read from the dataset"),
            QueryStep::new("LIMIT 10", "Inspect a few rows to diagnose the problem"),
        ])
    }

    fn from_steps(breakdown: Vec<QueryStep>) -> Self {
        let sql = breakdown
            .iter()
            .map(|step| step.clause.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { sql, breakdown }
    }
}

fn quote_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, StorageType};

    fn make_dataset(names: &[&str]) -> Dataset {
        Dataset::new(
            "t",
            names
                .iter()
                .map(|n| Column::new(*n, StorageType::String))
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_basic_preview() {
        let dataset = make_dataset(&["a", "b", "c", "d", "e", "f", "g"]);
        let preview = SqlPreview::build(
            &dataset,
            &ColumnHints::default(),
            &QuestionProfile::from_question("What drives sales?"),
            &ReportConfig::default(),
        );

        assert_eq!(
            preview.sql,
            "SELECT a, b, c, d, e\nFROM dataset\nORDER BY a\nLIMIT 100"
        );
        assert_eq!(preview.breakdown.len(), 4);
    }

    #[test]
    fn test_recent_adds_where_clause() {
        let dataset = make_dataset(&["user_id", "signup date"]);
        let hints = ColumnHints {
            date_columns: vec!["signup date".to_string()],
            ..ColumnHints::default()
        };
        let preview = SqlPreview::build(
            &dataset,
            &hints,
            &QuestionProfile::from_question("Show recent signups"),
            &ReportConfig::default(),
        );

        assert!(preview
            .sql
            .contains("WHERE \"signup date\" >= CURRENT_DATE - INTERVAL '30 days'"));
        assert_eq!(preview.breakdown.len(), 5);
        assert_eq!(preview.breakdown[2].description, "Keep only records from the last 30 days");
    }

    #[test]
    fn test_recent_without_date_column() {
        let dataset = make_dataset(&["a"]);
        let preview = SqlPreview::build(
            &dataset,
            &ColumnHints::default(),
            &QuestionProfile::from_question("recent activity"),
            &ReportConfig::default(),
        );
        assert!(!preview.sql.contains("WHERE"));
    }

    #[test]
    fn test_count_preview() {
        let preview = SqlPreview::count();
        assert!(preview.sql.starts_with("SELECT COUNT(*)"));
        assert_eq!(preview.breakdown.len(), 2);
    }
}
