//! Aggregate validation outcome.

use serde::{Deserialize, Serialize};

use super::finding::Finding;

/// Confidence never drops below this for a valid dataset.
const MIN_VALID_CONFIDENCE: f64 = 0.1;

/// Confidence lost per warning.
const WARNING_PENALTY: f64 = 0.05;

/// Outcome of validating a dataset.
///
/// `is_valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Overall trust in the data (0.0-1.0).
    pub confidence: f64,
    /// Share of filled cells in the quality sample (0-100).
    pub completeness: f64,
}

impl ValidationResult {
    /// Build a result from findings and a completeness percentage.
    pub fn from_findings(findings: Vec<Finding>, completeness: f64) -> Self {
        let (errors, warnings): (Vec<Finding>, Vec<Finding>) =
            findings.into_iter().partition(Finding::is_error);

        let mut result = Self {
            is_valid: errors.is_empty(),
            errors: errors.into_iter().map(|f| f.message).collect(),
            warnings: warnings.into_iter().map(|f| f.message).collect(),
            confidence: 0.0,
            completeness: completeness.clamp(0.0, 100.0),
        };
        result.rescore();
        result
    }

    /// A result describing a request that never reached validation.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
            confidence: 0.0,
            completeness: 0.0,
        }
    }

    /// Append extra warnings and recompute confidence.
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
        self.rescore();
        self
    }

    fn rescore(&mut self) {
        self.is_valid = self.errors.is_empty();
        self.confidence = if self.is_valid {
            let penalty = WARNING_PENALTY * self.warnings.len() as f64;
            (self.completeness / 100.0 - penalty).clamp(MIN_VALID_CONFIDENCE, 1.0)
        } else {
            0.0
        };
    }
}
