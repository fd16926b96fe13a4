//! Statistical metrics over classified columns.
//!
//! This module provides:
//! - Streaming numeric summaries (Welford's algorithm)
//! - Category frequency distributions
//! - Date ranges
//! - Pearson correlation between two numeric columns

mod engine;
mod metrics;
mod profile;

pub use engine::{pearson, StatisticsEngine, DEFAULT_MIN_CORRELATION_PAIRS};
pub use metrics::{
    CategoricalMetrics, CategoryCount, CorrelationDirection, CorrelationMetrics,
    CorrelationStrength, StatisticalMetrics, TemporalMetrics,
};
pub use profile::{ColumnMetrics, DatasetMetrics, PairCorrelation};
