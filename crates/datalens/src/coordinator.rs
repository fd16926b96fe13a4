//! Pipeline orchestration and the error boundary.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::inference::TypeInferenceEngine;
use crate::input::{AnalysisContext, NormalizedDataset, Normalizer, RawDataset};
use crate::logging::{panic_message, AnalysisLogger, TracingLogger};
use crate::narrative::{InsightNarrator, NarrativeInput};
use crate::question::QuestionProfile;
use crate::report::{
    generate_report_id, overall_confidence, AnalysisReport, Confidence, ReportContext,
    ResultsAssembler, SqlPreview,
};
use crate::statistics::{DatasetMetrics, StatisticsEngine};
use crate::validation::{DataValidator, ValidationResult};

const RECOVERY_RECOMMENDATIONS: &[&str] = &[
    "Make sure the research question is not empty",
    "Check that the dataset has named columns and at least one row",
    "Run the analysis again once the input has been corrected",
];

/// Pipeline stage, reported to the logger on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validating,
    Normalizing,
    Analyzing,
    Assembling,
    Done,
    Error,
}

impl Stage {
    /// Get the stage name used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Normalizing => "normalizing",
            Stage::Analyzing => "analyzing",
            Stage::Assembling => "assembling",
            Stage::Done => "done",
            Stage::Error => "error",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runs an analysis from request to report.
///
/// The coordinator holds only configuration and a logger, so one instance can
/// serve concurrent calls from several threads. Every call builds its own
/// engines.
///
/// # Example
///
/// ```
/// use datalens::{AnalysisContext, AnalysisCoordinator, RawDataset};
/// use serde_json::json;
///
/// let rows = (1..=12)
///     .map(|i| json!({"units": i, "revenue": i * 10}))
///     .filter_map(|v| v.as_object().cloned())
///     .collect();
/// let context = AnalysisContext::new("Is there a correlation between units and revenue?")
///     .with_dataset(RawDataset::from_bare(["units", "revenue"], rows));
///
/// let report = AnalysisCoordinator::new().analyze(&context);
/// assert!(report.data_quality.is_valid);
/// assert!(report.result("correlation-units-revenue").is_some());
/// ```
pub struct AnalysisCoordinator {
    config: AnalysisConfig,
    logger: Arc<dyn AnalysisLogger>,
}

impl AnalysisCoordinator {
    /// Create a coordinator with default configuration, logging through `tracing`.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a coordinator with custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the logger.
    pub fn with_logger(self, logger: impl AnalysisLogger + 'static) -> Self {
        self.with_shared_logger(Arc::new(logger))
    }

    /// Replace the logger with one that is shared elsewhere.
    pub fn with_shared_logger(mut self, logger: Arc<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a request.
    ///
    /// Never fails: an unusable request, or a panic anywhere in the pipeline,
    /// produces a degraded report with low confidence and
    /// `data_quality.is_valid == false`. The default panic hook still prints
    /// before the unwind is caught; see [`crate::logging::route_panics_to`].
    pub fn analyze(&self, context: &AnalysisContext) -> AnalysisReport {
        let timestamp = Utc::now();

        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| self.try_analyze_at(context, timestamp)));
        let error = match outcome {
            Ok(Ok(report)) => return report,
            Ok(Err(error)) => error,
            Err(payload) => AnalysisError::Internal(panic_message(payload.as_ref())),
        };

        self.logger.error(Stage::Error.label(), &error.to_string());
        self.fallback_report(context, &error, timestamp)
    }

    /// Analyze a request, returning request errors instead of a degraded report.
    ///
    /// Panics are not caught here.
    pub fn try_analyze(&self, context: &AnalysisContext) -> Result<AnalysisReport> {
        self.try_analyze_at(context, Utc::now())
    }

    fn try_analyze_at(
        &self,
        context: &AnalysisContext,
        timestamp: DateTime<Utc>,
    ) -> Result<AnalysisReport> {
        self.enter(Stage::Validating);
        let raw = check_request(context)?;

        self.enter(Stage::Normalizing);
        let normalized = Normalizer::new(&self.config.inference).normalize(raw);
        self.logger.debug(
            Stage::Normalizing.label(),
            &format!(
                "dataset '{}': {} rows, {} columns, {} notes",
                normalized.dataset.name,
                normalized.dataset.row_count(),
                normalized.dataset.column_count(),
                normalized.notes.len()
            ),
        );

        self.enter(Stage::Analyzing);
        let validation =
            DataValidator::with_config(&self.config.quality).validate_normalized(&normalized);
        for warning in &validation.warnings {
            self.logger.warn(Stage::Analyzing.label(), warning);
        }
        for error in &validation.errors {
            self.logger.error(Stage::Analyzing.label(), error);
        }

        let profile = QuestionProfile::from_question(context.question());
        let report = if profile.is_simple {
            self.logger
                .info(Stage::Analyzing.label(), "simple count question, skipping full analysis");
            self.count_report(context, &normalized, validation, timestamp)
        } else {
            self.full_report(context, &normalized, validation, &profile, timestamp)
        };

        self.enter(Stage::Done);
        self.logger.info(
            Stage::Done.label(),
            &format!(
                "report {} with {} results, confidence {}",
                report.id,
                report.results.len(),
                report.confidence.label()
            ),
        );
        Ok(report)
    }

    fn full_report(
        &self,
        context: &AnalysisContext,
        normalized: &NormalizedDataset,
        validation: ValidationResult,
        profile: &QuestionProfile,
        timestamp: DateTime<Utc>,
    ) -> AnalysisReport {
        let dataset = &normalized.dataset;

        let buckets = TypeInferenceEngine::with_config(self.config.inference.clone()).infer(dataset);
        self.logger.debug(
            Stage::Analyzing.label(),
            &format!(
                "inferred {} numerical, {} categorical, {} temporal, {} boolean columns",
                buckets.numerical.len(),
                buckets.categorical.len(),
                buckets.temporal.len(),
                buckets.boolean.len()
            ),
        );

        let statistics = StatisticsEngine::new()
            .with_min_correlation_pairs(self.config.report.min_correlation_pairs);
        let metrics =
            DatasetMetrics::compute(dataset, &buckets, &statistics, profile.wants_relationship);

        self.enter(Stage::Assembling);
        let results = ResultsAssembler::with_config(self.config.report.clone(), &self.config.quality)
            .assemble(dataset, &buckets, &metrics, &validation, profile, timestamp);

        let narrative =
            InsightNarrator::with_config(self.config.report.clone(), self.config.quality.clone())
                .narrate(&NarrativeInput {
                    dataset,
                    buckets: &buckets,
                    metrics: &metrics,
                    profile,
                    completeness: validation.completeness,
                    business_context: context.business_context(),
                });

        let confidence = overall_confidence(&results, validation.is_valid);

        AnalysisReport {
            id: generate_report_id(timestamp),
            timestamp,
            context: ReportContext::from_context(context),
            results,
            insights: narrative.insights,
            confidence,
            recommendations: narrative.recommendations,
            sql_preview: String::new(),
            query_breakdown: Vec::new(),
            data_quality: validation,
        }
        .with_sql(SqlPreview::build(
            dataset,
            &normalized.hints,
            profile,
            &self.config.report,
        ))
    }

    fn count_report(
        &self,
        context: &AnalysisContext,
        normalized: &NormalizedDataset,
        validation: ValidationResult,
        timestamp: DateTime<Utc>,
    ) -> AnalysisReport {
        let dataset = &normalized.dataset;

        self.enter(Stage::Assembling);
        let assembler =
            ResultsAssembler::with_config(self.config.report.clone(), &self.config.quality);
        let results = vec![
            assembler.overview(dataset, None, validation.is_valid, timestamp),
            assembler.record_count(dataset, validation.is_valid, timestamp),
        ];
        let narrative = InsightNarrator::narrate_count(dataset);
        let confidence = overall_confidence(&results, validation.is_valid);

        AnalysisReport {
            id: generate_report_id(timestamp),
            timestamp,
            context: ReportContext::from_context(context),
            results,
            insights: narrative.insights,
            confidence,
            recommendations: narrative.recommendations,
            sql_preview: String::new(),
            query_breakdown: Vec::new(),
            data_quality: validation,
        }
        .with_sql(SqlPreview::count())
    }

    fn fallback_report(
        &self,
        context: &AnalysisContext,
        error: &AnalysisError,
        timestamp: DateTime<Utc>,
    ) -> AnalysisReport {
        AnalysisReport {
            id: generate_report_id(timestamp),
            timestamp,
            context: ReportContext::from_context(context),
            results: Vec::new(),
            insights: vec![format!("Analysis could not be completed: {}", error)],
            confidence: Confidence::Low,
            recommendations: RECOVERY_RECOMMENDATIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
            sql_preview: String::new(),
            query_breakdown: Vec::new(),
            data_quality: ValidationResult::failed(error.to_string()),
        }
        .with_sql(SqlPreview::fallback())
    }

    fn enter(&self, stage: Stage) {
        self.logger.debug(stage.label(), &format!("entering {} stage", stage));
    }
}

impl Default for AnalysisCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject requests that cannot be analyzed at all.
fn check_request(context: &AnalysisContext) -> Result<&RawDataset> {
    if context.question().is_empty() {
        return Err(AnalysisError::MissingQuestion);
    }

    let raw = context.primary_dataset().ok_or(AnalysisError::NoDatasets)?;
    if raw.rows.is_empty() {
        let name = raw.name.clone().unwrap_or_else(|| "dataset".to_string());
        return Err(AnalysisError::EmptyDataset(name));
    }

    Ok(raw)
}
