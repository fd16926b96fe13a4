//! Turns computed metrics into ordered result records.

use chrono::{DateTime, Utc};

use crate::config::{QualityConfig, ReportConfig};
use crate::input::Dataset;
use crate::question::QuestionProfile;
use crate::schema::TypeBuckets;
use crate::statistics::{CategoricalMetrics, DatasetMetrics};
use crate::validation::{estimate_duplicate_rows, ValidationResult};

use super::result::{
    AnalysisResult, Confidence, DatasetOverview, QualitySummary, ResultType, ResultValue,
    TypeCounts,
};

/// Builds the result list of a report.
///
/// Results come out in a fixed order: overview, numerical statistics,
/// categorical distributions, time ranges, data quality, then the optional
/// correlation. Missing metrics are skipped, never reported as failures.
pub struct ResultsAssembler {
    report: ReportConfig,
    duplicate_key_columns: usize,
}

impl ResultsAssembler {
    /// Create an assembler with default caps.
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default(), &QualityConfig::default())
    }

    /// Create an assembler with custom caps.
    pub fn with_config(report: ReportConfig, quality: &QualityConfig) -> Self {
        Self {
            report,
            duplicate_key_columns: quality.duplicate_key_columns,
        }
    }

    /// Assemble all results for a full analysis.
    pub fn assemble(
        &self,
        dataset: &Dataset,
        buckets: &TypeBuckets,
        metrics: &DatasetMetrics,
        validation: &ValidationResult,
        profile: &QuestionProfile,
        timestamp: DateTime<Utc>,
    ) -> Vec<AnalysisResult> {
        let grade = Grader {
            valid: validation.is_valid,
        };
        let mut results = vec![self.overview(
            dataset,
            Some(buckets),
            validation.is_valid,
            timestamp,
        )];

        for entry in metrics.numerical.iter().take(self.report.max_numerical_results) {
            let m = &entry.metrics;
            results.push(AnalysisResult {
                id: format!("numeric-stats-{}", entry.column),
                title: format!("{} Statistics", entry.column),
                description: format!(
                    "Average {:.2}, ranging from {:.2} to {:.2} (std dev {:.2})",
                    m.average, m.minimum, m.maximum, m.standard_deviation
                ),
                value: ResultValue::Statistics(m.clone()),
                confidence: grade.by_sample(m.count),
                result_type: ResultType::Statistic,
                timestamp,
            });
        }

        for entry in metrics
            .categorical
            .iter()
            .take(self.report.max_categorical_results)
        {
            let m = &entry.metrics;
            results.push(AnalysisResult {
                id: format!("category-distribution-{}", entry.column),
                title: format!("{} Distribution", entry.column),
                description: format!(
                    "{} categories; most common is '{}' ({:.1}% of records)",
                    m.unique_categories,
                    m.top_category,
                    m.top_share()
                ),
                value: ResultValue::Distribution(self.top_categories(m)),
                confidence: grade.by_sample(m.total_records),
                result_type: ResultType::Distribution,
                timestamp,
            });
        }

        for entry in metrics.temporal.iter().take(self.report.max_temporal_results) {
            let m = &entry.metrics;
            results.push(AnalysisResult {
                id: format!("temporal-distribution-{}", entry.column),
                title: format!("{} Time Range", entry.column),
                description: format!(
                    "From {} to {} ({} days)",
                    m.earliest.format("%Y-%m-%d"),
                    m.latest.format("%Y-%m-%d"),
                    m.day_span
                ),
                value: ResultValue::TimeRange(m.clone()),
                confidence: grade.by_sample(m.valid_date_count),
                result_type: ResultType::Trend,
                timestamp,
            });
        }

        results.push(self.quality(dataset, validation, timestamp));

        if profile.wants_relationship && buckets.numerical.len() >= 2 {
            if let Some(pair) = &metrics.correlation {
                let m = &pair.metrics;
                results.push(AnalysisResult {
                    id: format!("correlation-{}-{}", pair.column_a, pair.column_b),
                    title: format!("{} vs {} Correlation", pair.column_a, pair.column_b),
                    description: format!(
                        "{} {} correlation (r = {:.3}) across {} rows",
                        m.strength.label(),
                        m.direction.label(),
                        m.correlation_coefficient,
                        m.pair_count
                    ),
                    value: ResultValue::Correlation(pair.clone()),
                    confidence: grade.by_sample(m.pair_count),
                    result_type: ResultType::Correlation,
                    timestamp,
                });
            }
        }

        results
    }

    /// Dataset overview, with per-type column counts when types are known.
    pub fn overview(
        &self,
        dataset: &Dataset,
        buckets: Option<&TypeBuckets>,
        valid: bool,
        timestamp: DateTime<Utc>,
    ) -> AnalysisResult {
        let column_types = buckets.map(|b| TypeCounts {
            numerical: b.numerical.len(),
            categorical: b.categorical.len(),
            temporal: b.temporal.len(),
            boolean: b.boolean.len(),
        });

        let mut description = format!(
            "{} rows across {} columns",
            dataset.row_count(),
            dataset.column_count()
        );
        if let Some(types) = &column_types {
            description.push_str(&format!(
                " ({} numerical, {} categorical, {} temporal, {} boolean)",
                types.numerical, types.categorical, types.temporal, types.boolean
            ));
        }

        AnalysisResult {
            id: "dataset-overview".to_string(),
            title: "Dataset Overview".to_string(),
            description,
            value: ResultValue::Overview(DatasetOverview {
                row_count: dataset.row_count(),
                column_count: dataset.column_count(),
                column_types,
            }),
            confidence: Grader { valid }.fixed(Confidence::High),
            result_type: ResultType::Summary,
            timestamp,
        }
    }

    /// Plain record count, used for simple questions.
    pub fn record_count(
        &self,
        dataset: &Dataset,
        valid: bool,
        timestamp: DateTime<Utc>,
    ) -> AnalysisResult {
        AnalysisResult {
            id: "record-count".to_string(),
            title: "Record Count".to_string(),
            description: format!(
                "The dataset contains {} records with {} columns",
                dataset.row_count(),
                dataset.column_count()
            ),
            value: ResultValue::RecordCount(DatasetOverview {
                row_count: dataset.row_count(),
                column_count: dataset.column_count(),
                column_types: None,
            }),
            confidence: Grader { valid }.fixed(Confidence::High),
            result_type: ResultType::Count,
            timestamp,
        }
    }

    fn quality(
        &self,
        dataset: &Dataset,
        validation: &ValidationResult,
        timestamp: DateTime<Utc>,
    ) -> AnalysisResult {
        let duplicates = estimate_duplicate_rows(dataset, self.duplicate_key_columns);

        AnalysisResult {
            id: "data-quality".to_string(),
            title: "Data Quality".to_string(),
            description: format!(
                "{:.1}% complete, approximately {} duplicate rows",
                validation.completeness, duplicates
            ),
            value: ResultValue::Quality(QualitySummary {
                completeness: validation.completeness,
                estimated_duplicates: duplicates,
                total_rows: dataset.row_count(),
                warning_count: validation.warnings.len(),
            }),
            confidence: Grader {
                valid: validation.is_valid,
            }
            .fixed(Confidence::from_completeness(validation.completeness)),
            result_type: ResultType::Quality,
            timestamp,
        }
    }

    fn top_categories(&self, metrics: &CategoricalMetrics) -> CategoricalMetrics {
        let mut shown = metrics.clone();
        shown.frequencies.truncate(self.report.top_categories);
        shown
    }
}

impl Default for ResultsAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Downgrades every grade to low when validation failed.
struct Grader {
    valid: bool,
}

impl Grader {
    fn by_sample(&self, count: usize) -> Confidence {
        self.fixed(Confidence::from_sample_size(count))
    }

    fn fixed(&self, confidence: Confidence) -> Confidence {
        if self.valid {
            confidence
        } else {
            Confidence::Low
        }
    }
}
