//! Property-based tests for the datalens engines.
//!
//! These tests use proptest to generate random inputs and verify that the
//! engines keep their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p datalens --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p datalens --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{json, Value};

use datalens::input::{Column, StorageType};
use datalens::{
    AnalysisContext, AnalysisCoordinator, Confidence, DataValidator, Dataset, NullLogger,
    RawDataset, Record, StatisticsEngine, TypeInferenceEngine,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Finite numbers of moderate magnitude.
fn finite_number() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

/// Arbitrary cell scalars, including blanks and junk text.
fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        any::<bool>().prop_map(Value::Bool),
        finite_number().prop_map(|n| json!(n)),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _\\-/:.]{0,16}".prop_map(Value::String),
        (2000i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| json!(format!("{:04}-{:02}-{:02}", y, m, d))),
    ]
}

/// A table of arbitrary cells.
fn table() -> impl Strategy<Value = Dataset> {
    (0usize..5, 0usize..30).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec(cell(), cols), rows).prop_map(move |data| {
            Dataset::new(
                "generated",
                (0..cols)
                    .map(|i| Column::new(format!("col_{}", i), StorageType::String))
                    .collect(),
                data,
            )
        })
    })
}

fn pairs(values: &[(f64, f64)]) -> (Vec<Value>, Vec<Value>) {
    values.iter().map(|(x, y)| (json!(x), json!(y))).unzip()
}

// =============================================================================
// Statistics
// =============================================================================

mod statistics_properties {
    use super::*;

    proptest! {
        /// The average always lies within the observed range.
        #[test]
        fn average_within_range(values in prop::collection::vec(finite_number(), 1..100)) {
            let cells: Vec<Value> = values.iter().map(|v| json!(v)).collect();
            let metrics = StatisticsEngine::new().numerical(&cells).unwrap();

            prop_assert!(metrics.minimum <= metrics.average);
            prop_assert!(metrics.average <= metrics.maximum);
            prop_assert!(metrics.standard_deviation >= 0.0);
            prop_assert_eq!(metrics.count, values.len());
        }

        /// Correlation does not depend on argument order.
        #[test]
        fn correlation_is_symmetric(values in prop::collection::vec((finite_number(), finite_number()), 5..60)) {
            let (xs, ys) = pairs(&values);
            let engine = StatisticsEngine::new();

            let forward = engine.correlation(xs.iter().zip(ys.iter())).unwrap();
            let backward = engine.correlation(ys.iter().zip(xs.iter())).unwrap();

            prop_assert!((forward.correlation_coefficient - backward.correlation_coefficient).abs() < 1e-9);
        }

        /// Five or more pairs always give a finite, bounded coefficient.
        #[test]
        fn correlation_is_finite(values in prop::collection::vec((finite_number(), finite_number()), 5..60)) {
            let (xs, ys) = pairs(&values);
            let metrics = StatisticsEngine::new()
                .correlation(xs.iter().zip(ys.iter()))
                .unwrap();

            prop_assert!(metrics.correlation_coefficient.is_finite());
            prop_assert!((-1.0..=1.0).contains(&metrics.correlation_coefficient));
        }

        /// Fewer than five pairs is a computation gap.
        #[test]
        fn correlation_needs_five_pairs(values in prop::collection::vec((finite_number(), finite_number()), 0..5)) {
            let (xs, ys) = pairs(&values);
            prop_assert!(StatisticsEngine::new().correlation(xs.iter().zip(ys.iter())).is_none());
        }

        /// Category counts add up to the total.
        #[test]
        fn categorical_counts_sum(values in prop::collection::vec("[a-d]{1,2}", 1..50)) {
            let cells: Vec<Value> = values.iter().map(|v| json!(v)).collect();
            let metrics = StatisticsEngine::new().categorical(&cells).unwrap();

            let sum: usize = metrics.frequencies.iter().map(|f| f.count).sum();
            prop_assert_eq!(sum, metrics.total_records);
            prop_assert!(metrics.diversity > 0.0 && metrics.diversity <= 1.0);
        }
    }
}

// =============================================================================
// Inference and Validation
// =============================================================================

mod table_properties {
    use super::*;

    proptest! {
        /// Classifying the same table twice gives the same buckets.
        #[test]
        fn inference_is_idempotent(dataset in table()) {
            let engine = TypeInferenceEngine::new();
            prop_assert_eq!(engine.infer(&dataset), engine.infer(&dataset));
        }

        /// Confidence of every classified column is a probability.
        #[test]
        fn inference_confidence_bounded(dataset in table()) {
            let buckets = TypeInferenceEngine::new().infer(&dataset);
            for typed in buckets.numerical.iter().chain(&buckets.categorical).chain(&buckets.temporal).chain(&buckets.boolean) {
                prop_assert!((0.0..=1.0).contains(&typed.confidence));
                prop_assert!(typed.samples.len() <= 5);
            }
        }

        /// Completeness is a percentage; validity tracks the shape.
        #[test]
        fn validation_invariants(dataset in table()) {
            let result = DataValidator::new().validate(&dataset);

            prop_assert!((0.0..=100.0).contains(&result.completeness));
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert_eq!(result.is_valid, result.errors.is_empty());

            let empty_shape = dataset.row_count() == 0 || dataset.column_count() == 0;
            prop_assert_eq!(result.is_valid, !empty_shape);
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

mod coordinator_properties {
    use super::*;

    fn record(cells: Vec<Value>) -> Record {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("f{}", i % 3), v))
            .collect()
    }

    proptest! {
        /// Any request produces a report without panicking.
        #[test]
        fn never_panics(
            question in "[a-zA-Z ?]{0,40}",
            rows in prop::collection::vec(prop::collection::vec(cell(), 0..4), 0..15),
        ) {
            let rows: Vec<Record> = rows.into_iter().map(record).collect();
            let context = AnalysisContext::new(question)
                .with_dataset(RawDataset::from_bare(["f0", "f1"], rows));

            let report = AnalysisCoordinator::new().with_logger(NullLogger).analyze(&context);

            prop_assert!(!report.insights.is_empty());
            prop_assert!(!report.recommendations.is_empty());
            if !report.data_quality.is_valid {
                prop_assert_eq!(report.confidence, Confidence::Low);
            }
        }

        /// A blank question always degrades.
        #[test]
        fn blank_question_is_low(question in "[ \t]{0,5}") {
            let rows: Vec<Record> = vec![record(vec![json!(1), json!("a")])];
            let context = AnalysisContext::new(question)
                .with_dataset(RawDataset::from_bare(["f0", "f1"], rows));

            let report = AnalysisCoordinator::new().with_logger(NullLogger).analyze(&context);

            prop_assert_eq!(report.confidence, Confidence::Low);
            prop_assert!(!report.data_quality.is_valid);
        }
    }
}
