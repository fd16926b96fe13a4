//! Rule-based insight and recommendation generation.
//!
//! Sentences are filled-in templates; nothing here calls out to a language
//! model.

use serde::{Deserialize, Serialize};

use crate::config::{QualityConfig, ReportConfig};
use crate::input::Dataset;
use crate::question::QuestionProfile;
use crate::schema::TypeBuckets;
use crate::statistics::DatasetMetrics;

/// Closing recommendation present in every narrative.
pub const EXPORT_RECOMMENDATION: &str =
    "Export these results and share the key findings with stakeholders";

/// Everything the narrator reads.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeInput<'a> {
    pub dataset: &'a Dataset,
    pub buckets: &'a TypeBuckets,
    pub metrics: &'a DatasetMetrics,
    pub profile: &'a QuestionProfile,
    /// Completeness percentage from validation.
    pub completeness: f64,
    pub business_context: Option<&'a str>,
}

/// Insights and recommendations for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Writes insights and recommendations from computed metrics.
pub struct InsightNarrator {
    report: ReportConfig,
    quality: QualityConfig,
}

impl InsightNarrator {
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default(), QualityConfig::default())
    }

    pub fn with_config(report: ReportConfig, quality: QualityConfig) -> Self {
        Self { report, quality }
    }

    /// Generate the narrative for a full analysis.
    pub fn narrate(&self, input: &NarrativeInput<'_>) -> Narrative {
        Narrative {
            insights: self.insights(input),
            recommendations: self.recommendations(input),
        }
    }

    /// Narrative for a row/column count question.
    pub fn narrate_count(dataset: &Dataset) -> Narrative {
        Narrative {
            insights: vec![format!(
                "The dataset contains {} records across {} columns",
                dataset.row_count(),
                dataset.column_count()
            )],
            recommendations: vec![
                "Ask a more specific question to explore patterns in the data".to_string(),
                EXPORT_RECOMMENDATION.to_string(),
            ],
        }
    }

    fn insights(&self, input: &NarrativeInput<'_>) -> Vec<String> {
        let mut insights = Vec::new();
        let per_kind = self.report.max_insight_columns;
        let metrics = input.metrics;

        insights.push(format!(
            "Analyzed {} records across {} columns",
            input.dataset.row_count(),
            input.dataset.column_count()
        ));

        if let Some(context) = input.business_context {
            insights.push(format!(
                "Findings are framed for the stated business context: {}",
                context
            ));
        }

        for entry in metrics.numerical.iter().take(per_kind) {
            let m = &entry.metrics;
            insights.push(format!(
                "{} averages {:.2}, ranging from {:.2} to {:.2}",
                entry.column, m.average, m.minimum, m.maximum
            ));
        }

        for entry in metrics.categorical.iter().take(per_kind) {
            let m = &entry.metrics;
            insights.push(format!(
                "{} has {} distinct values; '{}' is the most common ({:.1}% of records)",
                entry.column,
                m.unique_categories,
                m.top_category,
                m.top_share()
            ));
        }

        if let Some(entry) = metrics.temporal.first() {
            let m = &entry.metrics;
            insights.push(format!(
                "{} covers {} days, from {} to {}",
                entry.column,
                m.day_span,
                m.earliest.format("%Y-%m-%d"),
                m.latest.format("%Y-%m-%d")
            ));
        }

        insights.extend(self.keyword_remarks(input));

        if input.completeness >= self.quality.excellent_completeness {
            insights.push(format!(
                "Data completeness is excellent at {:.1}%",
                input.completeness
            ));
        } else {
            insights.push(format!(
                "Data completeness is {:.1}%; missing values may affect some results",
                input.completeness
            ));
        }

        insights
    }

    fn keyword_remarks(&self, input: &NarrativeInput<'_>) -> Vec<String> {
        let mut remarks = Vec::new();
        let buckets = input.buckets;

        if input.profile.wants_trend {
            if buckets.temporal.is_empty() {
                remarks.push(
                    "No date or time columns were detected, so trends over time cannot be measured directly"
                        .to_string(),
                );
            } else {
                remarks.push(format!(
                    "Time-based columns ({}) make it possible to analyze trends over time",
                    join_names(&buckets.temporal)
                ));
            }
        }

        if input.profile.mentions_correlation {
            match buckets.numerical.len() {
                0 | 1 => remarks.push(
                    "At least two numerical columns are needed to measure correlations".to_string(),
                ),
                n => remarks.push(format!(
                    "{} numerical columns are available for exploring relationships",
                    n
                )),
            }
        }

        if input.profile.wants_segments {
            if buckets.categorical.is_empty() {
                remarks.push("No categorical columns were found for segmenting the data".to_string());
            } else {
                remarks.push(format!(
                    "Categorical columns ({}) can be used to segment and group the data",
                    join_names(&buckets.categorical)
                ));
            }
        }

        remarks
    }

    fn recommendations(&self, input: &NarrativeInput<'_>) -> Vec<String> {
        let mut recommendations = Vec::new();
        let numerical = &input.buckets.numerical;

        if let [first, second, ..] = numerical.as_slice() {
            recommendations.push(format!(
                "Explore the correlation between {} and {} to uncover relationships",
                first.name, second.name
            ));
        }

        if let Some(first) = numerical.first() {
            recommendations.push(format!(
                "Visualize the distribution of {} with a histogram or box plot",
                first.name
            ));
        }

        if input.completeness < self.quality.cleaning_completeness {
            recommendations.push(
                "Clean the data to address missing values before drawing firm conclusions"
                    .to_string(),
            );
        }

        if input.dataset.row_count() > self.report.large_dataset_rows {
            recommendations.push(
                "Consider sampling the data to speed up exploratory analysis".to_string(),
            );
        }

        recommendations.push(EXPORT_RECOMMENDATION.to_string());
        recommendations
    }
}

impl Default for InsightNarrator {
    fn default() -> Self {
        Self::new()
    }
}

fn join_names(columns: &[crate::schema::TypedColumn]) -> String {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
