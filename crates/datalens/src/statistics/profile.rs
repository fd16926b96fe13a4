//! Per-dataset metric bundle shared by the assembler and the narrator.

use serde::{Deserialize, Serialize};

use crate::input::Dataset;
use crate::schema::{TypeBuckets, TypedColumn};

use super::engine::StatisticsEngine;
use super::metrics::{CategoricalMetrics, CorrelationMetrics, StatisticalMetrics, TemporalMetrics};

/// Metrics computed for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetrics<T> {
    pub column: String,
    pub metrics: T,
}

/// Correlation between two named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCorrelation {
    pub column_a: String,
    pub column_b: String,
    pub metrics: CorrelationMetrics,
}

/// Every metric the report needs, computed once per analysis.
///
/// Each list follows the column order of its bucket. Columns whose metric is a
/// gap are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetrics {
    pub numerical: Vec<ColumnMetrics<StatisticalMetrics>>,
    pub categorical: Vec<ColumnMetrics<CategoricalMetrics>>,
    pub temporal: Vec<ColumnMetrics<TemporalMetrics>>,
    pub correlation: Option<PairCorrelation>,
}

impl DatasetMetrics {
    /// Compute metrics for every classified column.
    ///
    /// The correlation is only attempted when `with_correlation` is set, and
    /// always pairs the first two numerical columns.
    pub fn compute(
        dataset: &Dataset,
        buckets: &TypeBuckets,
        engine: &StatisticsEngine,
        with_correlation: bool,
    ) -> Self {
        let numerical = collect(dataset, &buckets.numerical, |values| engine.numerical(values));
        let categorical =
            collect(dataset, &buckets.categorical, |values| engine.categorical(values));
        let temporal = collect(dataset, &buckets.temporal, |values| engine.temporal(values));

        let correlation = match (with_correlation, buckets.numerical.as_slice()) {
            (true, [first, second, ..]) => engine
                .correlation(dataset.column_pairs(first.position, second.position))
                .map(|metrics| PairCorrelation {
                    column_a: first.name.clone(),
                    column_b: second.name.clone(),
                    metrics,
                }),
            _ => None,
        };

        Self {
            numerical,
            categorical,
            temporal,
            correlation,
        }
    }

    /// Look up the numerical metrics of a column.
    pub fn numerical_for(&self, column: &str) -> Option<&StatisticalMetrics> {
        self.numerical
            .iter()
            .find(|m| m.column == column)
            .map(|m| &m.metrics)
    }
}

fn collect<T>(
    dataset: &Dataset,
    columns: &[TypedColumn],
    compute: impl Fn(Vec<&serde_json::Value>) -> Option<T>,
) -> Vec<ColumnMetrics<T>> {
    columns
        .iter()
        .filter_map(|typed| {
            let values: Vec<_> = dataset.column_values(typed.position).collect();
            compute(values).map(|metrics| ColumnMetrics {
                column: typed.name.clone(),
                metrics,
            })
        })
        .collect()
}
