//! Metric records produced by the statistics engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary statistics for a numerical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalMetrics {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    pub count: usize,
}

impl StatisticalMetrics {
    /// Width of the observed range.
    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// One category and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Distribution summary for a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalMetrics {
    pub unique_categories: usize,
    pub total_records: usize,
    pub top_category: String,
    pub top_count: usize,
    /// `unique_categories / total_records`, in (0, 1].
    pub diversity: f64,
    /// All categories by descending count, ties in first-seen order.
    pub frequencies: Vec<CategoryCount>,
}

impl CategoricalMetrics {
    /// Share of records held by the top category, as a percentage.
    pub fn top_share(&self) -> f64 {
        self.top_count as f64 / self.total_records as f64 * 100.0
    }
}

/// Range summary for a temporal column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalMetrics {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    /// Whole days covered, rounded up.
    pub day_span: i64,
    pub valid_date_count: usize,
}

/// Strength bucket of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    /// Bucket a coefficient by magnitude.
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.7 {
            CorrelationStrength::Strong
        } else if magnitude > 0.3 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    /// Get a lowercase label for prose.
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
        }
    }
}

/// Sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    /// Negative only for a strictly negative coefficient.
    pub fn from_coefficient(r: f64) -> Self {
        if r < 0.0 {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::Positive
        }
    }

    /// Get a lowercase label for prose.
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationDirection::Positive => "positive",
            CorrelationDirection::Negative => "negative",
        }
    }
}

/// Pearson correlation between two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMetrics {
    /// Pearson r, always finite and within [-1, 1].
    pub correlation_coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    /// Rows where both values were numeric.
    pub pair_count: usize,
}
