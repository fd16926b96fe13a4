//! The analysis request handed to the coordinator.

use serde::{Deserialize, Serialize};

use super::dataset::RawDataset;

/// A research question plus the datasets it is asked about.
///
/// Every field defaults when absent so that a malformed request still
/// deserializes and can be answered with a degraded report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    /// Free-text research question.
    #[serde(default)]
    pub research_question: String,

    /// Datasets in order; only the first is analyzed.
    #[serde(default)]
    pub datasets: Vec<RawDataset>,

    /// Optional description of the business setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_context: Option<String>,
}

impl AnalysisContext {
    /// Create a context for a question with no datasets yet.
    pub fn new(research_question: impl Into<String>) -> Self {
        Self {
            research_question: research_question.into(),
            ..Self::default()
        }
    }

    /// Add a dataset.
    pub fn with_dataset(mut self, dataset: RawDataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Set the business context.
    pub fn with_business_context(mut self, context: impl Into<String>) -> Self {
        self.business_context = Some(context.into());
        self
    }

    /// The question with surrounding whitespace removed.
    pub fn question(&self) -> &str {
        self.research_question.trim()
    }

    /// The first dataset, which is the one analyzed.
    pub fn primary_dataset(&self) -> Option<&RawDataset> {
        self.datasets.first()
    }

    /// Business context, if present and not blank.
    pub fn business_context(&self) -> Option<&str> {
        self.business_context
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
