//! Findings raised by validators.

use serde::{Deserialize, Serialize};

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth reporting, never blocks the analysis.
    Warning,
    /// Makes the dataset invalid.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single data quality issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// How serious the issue is.
    pub severity: Severity,
    /// Column the issue applies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Validator that raised the issue.
    pub detector: String,
}

impl Finding {
    /// Create a finding.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            column: None,
            message: message.into(),
            detector: String::new(),
        }
    }

    /// Create an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning finding.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Set the affected column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the detector name.
    pub fn with_detector(mut self, detector: impl Into<String>) -> Self {
        self.detector = detector.into();
        self
    }

    /// Check if this finding invalidates the dataset.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
