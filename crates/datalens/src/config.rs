//! Analysis configuration.
//!
//! Every threshold and cap the pipeline uses lives here so a caller can tune
//! the engine from a single JSON file. Missing fields fall back to defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Top-level configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Column type inference settings.
    pub inference: InferenceConfig,
    /// Data quality settings.
    pub quality: QualityConfig,
    /// Report assembly settings.
    pub report: ReportConfig,
}

/// Settings for semantic type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Maximum non-empty values sampled per column.
    pub sample_size: usize,
    /// Share of numeric samples above which a column is numerical.
    pub numeric_threshold: f64,
    /// Share of date samples above which a column is temporal.
    pub date_threshold: f64,
    /// Share of boolean tokens above which a column is boolean.
    pub boolean_threshold: f64,
    /// Confidence floor for columns classified temporal by name alone.
    pub name_match_confidence: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            numeric_threshold: 0.8,
            date_threshold: 0.7,
            boolean_threshold: 0.8,
            name_match_confidence: 0.7,
        }
    }
}

/// Settings for validation and completeness scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Leading rows scanned for completeness and fill rate (None = all rows).
    pub sample_rows: Option<usize>,
    /// Fill rate below which a column is reported.
    pub min_fill_rate: f64,
    /// Columns hashed per row for the duplicate estimate.
    pub duplicate_key_columns: usize,
    /// Completeness (%) at or above which the data is called excellent.
    pub excellent_completeness: f64,
    /// Completeness (%) below which cleaning is recommended.
    pub cleaning_completeness: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            sample_rows: Some(100),
            min_fill_rate: 0.5,
            duplicate_key_columns: 3,
            excellent_completeness: 95.0,
            cleaning_completeness: 90.0,
        }
    }
}

/// Settings for result assembly, narration and the SQL preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum numerical-statistics results.
    pub max_numerical_results: usize,
    /// Maximum categorical-distribution results.
    pub max_categorical_results: usize,
    /// Maximum temporal-distribution results.
    pub max_temporal_results: usize,
    /// Columns summarized per kind in the insight list.
    pub max_insight_columns: usize,
    /// Categories listed in a distribution result.
    pub top_categories: usize,
    /// Minimum numeric pairs for a correlation.
    pub min_correlation_pairs: usize,
    /// Row count above which sampling is recommended.
    pub large_dataset_rows: usize,
    /// Columns listed in the SQL preview SELECT clause.
    pub sql_column_limit: usize,
    /// LIMIT used by the SQL preview.
    pub sql_row_limit: usize,
    /// Window used when the question asks for recent data.
    pub recent_window_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_numerical_results: 3,
            max_categorical_results: 2,
            max_temporal_results: 1,
            max_insight_columns: 2,
            top_categories: 5,
            min_correlation_pairs: 5,
            large_dataset_rows: 1000,
            sql_column_limit: 5,
            sql_row_limit: 100,
            recent_window_days: 30,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use datalens::AnalysisConfig;
    /// let config = AnalysisConfig::load("datalens.json").unwrap();
    /// println!("Sample size: {}", config.inference.sample_size);
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| AnalysisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AnalysisConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        Ok(config)
    }

    /// Check that thresholds are in range.
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("inference.numeric_threshold", self.inference.numeric_threshold),
            ("inference.date_threshold", self.inference.date_threshold),
            ("inference.boolean_threshold", self.inference.boolean_threshold),
            ("inference.name_match_confidence", self.inference.name_match_confidence),
            ("quality.min_fill_rate", self.quality.min_fill_rate),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.inference.sample_size == 0 {
            return Err(AnalysisError::Config(
                "inference.sample_size must be at least 1".to_string(),
            ));
        }

        if self.report.min_correlation_pairs < 2 {
            return Err(AnalysisError::Config(
                "report.min_correlation_pairs must be at least 2".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inference.sample_size, 20);
        assert_eq!(config.quality.sample_rows, Some(100));
        assert_eq!(config.report.max_numerical_results, 3);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"report": {"sql_row_limit": 25}}"#).unwrap();

        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.report.sql_row_limit, 25);
        assert_eq!(config.report.max_categorical_results, 2);
        assert_eq!(config.inference, InferenceConfig::default());
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"inference": {"numeric_threshold": 1.5}}"#)
            .unwrap();

        let err = AnalysisConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalysisConfig::load("/nonexistent/datalens.json").unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
