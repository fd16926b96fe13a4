//! Structural and quality checks over a dataset.

use crate::config::QualityConfig;
use crate::input::{scalar, Dataset, NormalizedDataset};

use super::finding::Finding;
use super::result::ValidationResult;

/// Trait for validators.
pub trait Validator: Send + Sync {
    /// Short identifier used as the finding detector.
    fn name(&self) -> &'static str;

    /// Run validation and return findings.
    fn validate(&self, dataset: &Dataset) -> Vec<Finding>;
}

/// Requires at least one row.
pub struct RowCountValidator;

impl Validator for RowCountValidator {
    fn name(&self) -> &'static str {
        "row_count_validator"
    }

    fn validate(&self, dataset: &Dataset) -> Vec<Finding> {
        if dataset.row_count() == 0 {
            vec![Finding::error("Dataset contains no rows").with_detector(self.name())]
        } else {
            Vec::new()
        }
    }
}

/// Requires at least one column.
pub struct ColumnCountValidator;

impl Validator for ColumnCountValidator {
    fn name(&self) -> &'static str {
        "column_count_validator"
    }

    fn validate(&self, dataset: &Dataset) -> Vec<Finding> {
        if dataset.column_count() == 0 {
            vec![Finding::error("Dataset contains no columns").with_detector(self.name())]
        } else {
            Vec::new()
        }
    }
}

/// Warns about sparsely populated columns in the quality sample.
pub struct FillRateValidator {
    min_fill_rate: f64,
    sample_rows: Option<usize>,
}

impl FillRateValidator {
    pub fn new(min_fill_rate: f64, sample_rows: Option<usize>) -> Self {
        Self {
            min_fill_rate,
            sample_rows,
        }
    }
}

impl Default for FillRateValidator {
    fn default() -> Self {
        let config = QualityConfig::default();
        Self::new(config.min_fill_rate, config.sample_rows)
    }
}

impl Validator for FillRateValidator {
    fn name(&self) -> &'static str {
        "fill_rate_validator"
    }

    fn validate(&self, dataset: &Dataset) -> Vec<Finding> {
        let rows = sampled_rows(dataset, self.sample_rows);
        if rows == 0 {
            return Vec::new();
        }

        dataset
            .columns
            .iter()
            .enumerate()
            .filter_map(|(idx, column)| {
                let filled = dataset
                    .column_values(idx)
                    .take(rows)
                    .filter(|v| !scalar::is_empty(v))
                    .count();
                let rate = filled as f64 / rows as f64;

                (rate < self.min_fill_rate).then(|| {
                    Finding::warning(format!(
                        "Column '{}' has low data quality ({:.0}% filled)",
                        column.name,
                        rate * 100.0
                    ))
                    .with_column(&column.name)
                    .with_detector(self.name())
                })
            })
            .collect()
    }
}

/// Warns about columns that hold a single repeated value.
pub struct ConstantColumnValidator {
    sample_rows: Option<usize>,
}

impl ConstantColumnValidator {
    pub fn new(sample_rows: Option<usize>) -> Self {
        Self { sample_rows }
    }
}

impl Default for ConstantColumnValidator {
    fn default() -> Self {
        Self::new(QualityConfig::default().sample_rows)
    }
}

impl Validator for ConstantColumnValidator {
    fn name(&self) -> &'static str {
        "constant_column_validator"
    }

    fn validate(&self, dataset: &Dataset) -> Vec<Finding> {
        let rows = sampled_rows(dataset, self.sample_rows);
        let mut findings = Vec::new();

        for (idx, column) in dataset.columns.iter().enumerate() {
            let mut texts = dataset
                .column_values(idx)
                .take(rows)
                .filter_map(scalar::as_text);

            let Some(first) = texts.next() else {
                continue;
            };
            let mut seen = 1usize;
            let mut constant = true;
            for text in texts {
                seen += 1;
                if text != first {
                    constant = false;
                    break;
                }
            }

            if constant && seen >= 2 {
                findings.push(
                    Finding::warning(format!(
                        "Column '{}' has the same value ('{}') in every sampled row",
                        column.name, first
                    ))
                    .with_column(&column.name)
                    .with_detector(self.name()),
                );
            }
        }

        findings
    }
}

/// Runs every validator and scores the dataset.
pub struct DataValidator {
    validators: Vec<Box<dyn Validator>>,
    sample_rows: Option<usize>,
}

impl DataValidator {
    /// Create a validator with the default checks.
    pub fn new() -> Self {
        Self::with_config(&QualityConfig::default())
    }

    /// Create a validator with the default checks tuned by `config`.
    pub fn with_config(config: &QualityConfig) -> Self {
        Self {
            validators: vec![
                Box::new(RowCountValidator),
                Box::new(ColumnCountValidator),
                Box::new(FillRateValidator::new(config.min_fill_rate, config.sample_rows)),
                Box::new(ConstantColumnValidator::new(config.sample_rows)),
            ],
            sample_rows: config.sample_rows,
        }
    }

    /// Add a custom check after the default ones.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Run all validators and collect findings, errors first.
    pub fn findings(&self, dataset: &Dataset) -> Vec<Finding> {
        let mut all = Vec::new();
        for validator in &self.validators {
            all.extend(validator.validate(dataset));
        }
        all.sort_by(|a, b| b.severity.cmp(&a.severity));
        all
    }

    /// Validate a dataset.
    pub fn validate(&self, dataset: &Dataset) -> ValidationResult {
        ValidationResult::from_findings(self.findings(dataset), self.completeness(dataset))
    }

    /// Validate a normalized dataset, counting its notes as warnings.
    pub fn validate_normalized(&self, normalized: &NormalizedDataset) -> ValidationResult {
        self.validate(&normalized.dataset)
            .with_warnings(normalized.notes.iter().cloned())
    }

    /// Filled cells as a percentage of the quality sample (0 for an empty table).
    pub fn completeness(&self, dataset: &Dataset) -> f64 {
        let (filled, total) = dataset.filled_cells(self.sample_rows);
        if total == 0 {
            0.0
        } else {
            filled as f64 / total as f64 * 100.0
        }
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn sampled_rows(dataset: &Dataset, limit: Option<usize>) -> usize {
    limit.unwrap_or(usize::MAX).min(dataset.row_count())
}
