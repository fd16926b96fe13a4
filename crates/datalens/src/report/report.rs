//! The report returned by every analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::AnalysisContext;
use crate::validation::ValidationResult;

use super::result::{AnalysisResult, Confidence};
use super::sql::{QueryStep, SqlPreview};

/// Summary of the request a report answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub research_question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_context: Option<String>,
    pub dataset_count: usize,
    /// Name of the analyzed (first) dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,
    pub row_count: usize,
    pub column_count: usize,
}

impl ReportContext {
    /// Echo the parts of a request worth keeping in the report.
    pub fn from_context(context: &AnalysisContext) -> Self {
        Self {
            research_question: context.research_question.clone(),
            business_context: context.business_context().map(str::to_string),
            dataset_count: context.datasets.len(),
            dataset_name: context.primary_dataset().and_then(|d| d.name.clone()),
            row_count: context.primary_dataset().map_or(0, |d| d.row_count()),
            column_count: context.primary_dataset().map_or(0, |d| d.columns.len()),
        }
    }
}

/// Outcome of one analysis call. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub context: ReportContext,
    pub results: Vec<AnalysisResult>,
    pub insights: Vec<String>,
    pub confidence: Confidence,
    pub recommendations: Vec<String>,
    pub sql_preview: String,
    pub query_breakdown: Vec<QueryStep>,
    pub data_quality: ValidationResult,
}

impl AnalysisReport {
    /// Attach a SQL preview.
    pub fn with_sql(mut self, preview: SqlPreview) -> Self {
        self.sql_preview = preview.sql;
        self.query_breakdown = preview.breakdown;
        self
    }

    /// Look up a result by id.
    pub fn result(&self, id: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.id == id)
    }
}

/// Grade a whole report from its results.
///
/// Low when validation failed or there are no results; otherwise high when
/// more than 60% of results are high, medium when more than 30% are.
pub fn overall_confidence(results: &[AnalysisResult], valid: bool) -> Confidence {
    if !valid || results.is_empty() {
        return Confidence::Low;
    }

    let high = results
        .iter()
        .filter(|r| r.confidence == Confidence::High)
        .count();
    let share = high as f64 / results.len() as f64;

    if share > 0.6 {
        Confidence::High
    } else if share > 0.3 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Report id of the form `report_<unix-millis>_<random hex>`.
pub fn generate_report_id(timestamp: DateTime<Utc>) -> String {
    format!(
        "report_{}_{:08x}",
        timestamp.timestamp_millis(),
        fastrand::u32(..)
    )
}
