//! Error types for the datalens library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datalens operations.
///
/// Inside [`AnalysisCoordinator::analyze`](crate::AnalysisCoordinator::analyze)
/// every variant is converted into a degraded report; the error only reaches a
/// caller through configuration loading and the lower-level helpers.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The research question is missing or blank.
    #[error("Research question is required")]
    MissingQuestion,

    /// The context carries no datasets.
    #[error("At least one dataset is required")]
    NoDatasets,

    /// The first dataset has no rows.
    #[error("Dataset '{0}' contains no rows")]
    EmptyDataset(String),

    /// A panic raised inside the analysis pipeline.
    #[error("Internal analysis failure: {0}")]
    Internal(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Whether this error describes an unusable analysis request
    /// rather than a failure of the engine itself.
    pub fn is_context_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingQuestion
                | AnalysisError::NoDatasets
                | AnalysisError::EmptyDataset(_)
        )
    }
}

/// Result type alias for datalens operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
