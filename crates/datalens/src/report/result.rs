//! Typed result records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::statistics::{
    CategoricalMetrics, PairCorrelation, StatisticalMetrics, TemporalMetrics,
};

/// Sample size at which a result is trusted highly.
const HIGH_SAMPLE: usize = 30;
/// Sample size at which a result is trusted moderately.
const MEDIUM_SAMPLE: usize = 10;

/// How much a result (or report) can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Grade by the number of observations behind a metric.
    pub fn from_sample_size(count: usize) -> Self {
        if count >= HIGH_SAMPLE {
            Confidence::High
        } else if count >= MEDIUM_SAMPLE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Grade by completeness percentage.
    pub fn from_completeness(completeness: f64) -> Self {
        if completeness >= 90.0 {
            Confidence::High
        } else if completeness >= 70.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Category of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Summary,
    Count,
    Statistic,
    Distribution,
    Trend,
    Quality,
    Correlation,
}

impl ResultType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ResultType::Summary => "Summary",
            ResultType::Count => "Count",
            ResultType::Statistic => "Statistic",
            ResultType::Distribution => "Distribution",
            ResultType::Trend => "Trend",
            ResultType::Quality => "Quality",
            ResultType::Correlation => "Correlation",
        }
    }
}

/// Column counts per semantic type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    pub numerical: usize,
    pub categorical: usize,
    pub temporal: usize,
    pub boolean: usize,
}

/// Shape of the analyzed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    /// Absent when types were not inferred (simple questions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_types: Option<TypeCounts>,
}

/// Completeness and duplicate estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub completeness: f64,
    /// Rows whose leading values repeat an earlier row (approximate).
    pub estimated_duplicates: usize,
    pub total_rows: usize,
    pub warning_count: usize,
}

/// Payload of a result, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultValue {
    Overview(DatasetOverview),
    RecordCount(DatasetOverview),
    Statistics(StatisticalMetrics),
    Distribution(CategoricalMetrics),
    TimeRange(TemporalMetrics),
    Quality(QualitySummary),
    Correlation(PairCorrelation),
}

/// One finding in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Stable per category, e.g. `numeric-stats-price`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub value: ResultValue,
    pub confidence: Confidence,
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub timestamp: DateTime<Utc>,
}
