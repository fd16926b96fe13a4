//! Datalens: question-driven analysis engine for tabular datasets.
//!
//! Datalens takes a dataset that has already been decoded into columns and rows,
//! together with a free-text research question, and produces a structured
//! report: inferred column semantics, statistics, insights and recommendations.
//!
//! # Core Principles
//!
//! - **Question-aware**: Keywords in the question decide which analyses run
//! - **Graceful degradation**: Every call returns a report, never an error
//! - **Pure components**: Each engine is deterministic and usable on its own
//!
//! # Example
//!
//! ```
//! use datalens::{AnalysisContext, AnalysisCoordinator, RawDataset};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"region": "north", "sales": 120}),
//!     json!({"region": "south", "sales": 95}),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let context = AnalysisContext::new("Which region sells more?")
//!     .with_dataset(RawDataset::from_bare(["region", "sales"], rows));
//!
//! let report = AnalysisCoordinator::new().analyze(&context);
//! println!("Results: {}", report.results.len());
//! println!("Confidence: {}", report.confidence.label());
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod logging;
pub mod narrative;
pub mod question;
pub mod report;
pub mod schema;
pub mod statistics;
pub mod validation;

mod coordinator;

pub use crate::coordinator::{AnalysisCoordinator, Stage};
pub use config::{AnalysisConfig, InferenceConfig, QualityConfig, ReportConfig};
pub use error::{AnalysisError, Result};
pub use inference::TypeInferenceEngine;
pub use input::{AnalysisContext, ColumnDescriptor, Dataset, RawDataset, Record};
pub use logging::{AnalysisLogger, NullLogger, TracingLogger};
pub use narrative::{InsightNarrator, Narrative};
pub use question::QuestionProfile;
pub use report::{AnalysisReport, AnalysisResult, Confidence, ResultType, ResultsAssembler};
pub use schema::{SemanticType, TypeBuckets, TypedColumn};
pub use statistics::{DatasetMetrics, StatisticsEngine};
pub use validation::{DataValidator, ValidationResult};
