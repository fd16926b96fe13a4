//! Integration tests for datalens.

use std::io::Write;
use tempfile::NamedTempFile;

use serde_json::{json, Value};

use datalens::report::ResultValue;
use datalens::statistics::{CorrelationDirection, CorrelationStrength};
use datalens::{
    AnalysisConfig, AnalysisContext, AnalysisCoordinator, ColumnDescriptor, Confidence,
    NullLogger, RawDataset, Record, ResultType,
};

/// Turn JSON objects into input rows.
fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

fn coordinator() -> AnalysisCoordinator {
    AnalysisCoordinator::new().with_logger(NullLogger)
}

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_trend_question_with_dates() {
    let rows = records(
        (0..100)
            .map(|i| {
                json!({
                    "id": i + 1,
                    "category": (["alpha", "beta", "gamma"][i % 3]),
                    "created_at": format!("2024-{:02}-{:02}", i / 28 + 1, i % 28 + 1),
                })
            })
            .collect(),
    );
    let dataset = RawDataset::from_descriptors(
        vec![
            ColumnDescriptor::new("id", "number"),
            ColumnDescriptor::new("category", "string"),
            ColumnDescriptor::new("created_at", "date"),
        ],
        rows,
    );
    let context = AnalysisContext::new("What's the trend over time?").with_dataset(dataset);

    let report = coordinator().analyze(&context);

    let temporal: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.result_type == ResultType::Trend)
        .collect();
    assert_eq!(temporal.len(), 1);
    match &temporal[0].value {
        ResultValue::TimeRange(metrics) => assert_eq!(metrics.valid_date_count, 100),
        other => panic!("unexpected value {:?}", other),
    }

    assert!(report
        .insights
        .iter()
        .any(|i| i.contains("created_at") && i.contains("trends over time")));
    assert_eq!(report.confidence, Confidence::High);
}

#[test]
fn test_correlation_question_perfect_line() {
    let rows = records((1..=20).map(|x| json!({"x": x, "y": 2 * x})).collect());
    let context = AnalysisContext::new("Is there a correlation?")
        .with_dataset(RawDataset::from_bare(["x", "y"], rows));

    let report = coordinator().analyze(&context);
    let result = report
        .result("correlation-x-y")
        .expect("correlation result");

    match &result.value {
        ResultValue::Correlation(pair) => {
            assert!((pair.metrics.correlation_coefficient - 1.0).abs() < 1e-9);
            assert_eq!(pair.metrics.strength, CorrelationStrength::Strong);
            assert_eq!(pair.metrics.direction, CorrelationDirection::Positive);
        }
        other => panic!("unexpected value {:?}", other),
    }

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["value"]["metrics"]["strength"], "Strong");
    assert_eq!(json["value"]["metrics"]["direction"], "positive");
}

#[test]
fn test_completeness_with_one_empty_cell() {
    let rows = records(vec![
        json!({"a": 1, "b": "x"}),
        json!({"a": 2, "b": ""}),
        json!({"a": 3, "b": "z"}),
    ]);
    let context = AnalysisContext::new("Describe the data")
        .with_dataset(RawDataset::from_bare(["a", "b"], rows));

    let report = coordinator().analyze(&context);

    assert!(report.data_quality.is_valid);
    assert!((report.data_quality.completeness - 83.333).abs() < 0.01);
}

#[test]
fn test_empty_question_degrades() {
    let rows = records(vec![json!({"a": 1})]);
    let context = AnalysisContext::new("").with_dataset(RawDataset::from_bare(["a"], rows));

    let report = coordinator().analyze(&context);

    assert_eq!(report.confidence, Confidence::Low);
    assert!(!report.data_quality.is_valid);
    assert_eq!(report.data_quality.confidence, 0.0);
    assert!(report.results.is_empty());
    assert!(!report.recommendations.is_empty());
    assert!(!report.sql_preview.is_empty());
}

#[test]
fn test_correlation_without_numbers_is_omitted() {
    let rows = records(
        (0..12)
            .map(|i| json!({"team": (["red", "blue"][i % 2]), "city": (["Oslo", "Lima", "Pune"][i % 3])}))
            .collect(),
    );
    let context = AnalysisContext::new("Is there a correlation between team and city?")
        .with_dataset(RawDataset::from_bare(["team", "city"], rows));

    let report = coordinator().analyze(&context);

    assert!(report.data_quality.is_valid);
    assert!(report
        .results
        .iter()
        .all(|r| r.result_type != ResultType::Correlation));
}

// =============================================================================
// Request Handling
// =============================================================================

#[test]
fn test_no_datasets_degrades() {
    let report = coordinator().analyze(&AnalysisContext::new("Why?"));
    assert!(!report.data_quality.is_valid);
    assert_eq!(report.data_quality.errors, vec!["At least one dataset is required"]);
}

#[test]
fn test_empty_dataset_degrades() {
    let context = AnalysisContext::new("Why?")
        .with_dataset(RawDataset::from_bare(["a"], Vec::new()).with_name("empty"));
    let report = coordinator().analyze(&context);

    assert_eq!(report.confidence, Confidence::Low);
    assert!(report.insights[0].contains("'empty'"));
}

#[test]
fn test_json_request_both_column_forms() {
    let bare: AnalysisContext = serde_json::from_value(json!({
        "researchQuestion": "Summarize",
        "datasets": [{"columns": ["a", "b"], "rows": [{"a": 1, "b": "x"}]}]
    }))
    .unwrap();
    let described: AnalysisContext = serde_json::from_value(json!({
        "researchQuestion": "Summarize",
        "datasets": [{
            "name": "typed",
            "columns": [{"name": "a", "type": "number"}, {"name": "b"}],
            "rows": [{"a": 1, "b": "x"}]
        }]
    }))
    .unwrap();

    let coordinator = coordinator();
    for context in [bare, described] {
        let report = coordinator.analyze(&context);
        assert!(report.data_quality.is_valid);
        assert_eq!(report.context.column_count, 2);
    }
}

#[test]
fn test_malformed_request_still_deserializes() {
    let context: AnalysisContext = serde_json::from_value(json!({"unexpected": true})).unwrap();
    let report = coordinator().analyze(&context);
    assert_eq!(report.confidence, Confidence::Low);
}

#[test]
fn test_columns_derived_from_first_row() {
    let rows = records(vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})]);
    let context = AnalysisContext::new("Summarize")
        .with_dataset(RawDataset::from_bare(Vec::<String>::new(), rows));

    let report = coordinator().analyze(&context);

    assert!(report.data_quality.is_valid);
    assert!(!report.data_quality.warnings.is_empty());
    assert!(report.result("numeric-stats-a").is_some());
}

#[test]
fn test_undeclared_fields_become_warnings() {
    let rows = records(vec![
        json!({"a": 1, "extra": "x"}),
        json!({"a": 2, "extra": "y"}),
    ]);
    let context = AnalysisContext::new("Summarize")
        .with_dataset(RawDataset::from_bare(["a"], rows));

    let report = coordinator().analyze(&context);
    assert!(report
        .data_quality
        .warnings
        .iter()
        .any(|w| w.contains("not declared")));
}

// =============================================================================
// Report Shape
// =============================================================================

#[test]
fn test_report_serializes_camel_case() {
    let rows = records((0..5).map(|i| json!({"v": i})).collect());
    let context = AnalysisContext::new("Summarize")
        .with_business_context("Quarterly review")
        .with_dataset(RawDataset::from_bare(["v"], rows));

    let report = coordinator().analyze(&context);
    let json = serde_json::to_value(&report).unwrap();

    for key in [
        "id",
        "timestamp",
        "context",
        "results",
        "insights",
        "confidence",
        "recommendations",
        "sqlPreview",
        "queryBreakdown",
        "dataQuality",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["context"]["researchQuestion"], "Summarize");
    assert_eq!(json["context"]["businessContext"], "Quarterly review");
    assert!(json["dataQuality"]["isValid"].as_bool().unwrap());
    assert!(report.id.starts_with("report_"));
    assert!(report.insights.iter().any(|i| i.contains("Quarterly review")));
}

#[test]
fn test_recent_question_filters_sql() {
    let rows = records(
        (0..10)
            .map(|i| json!({"user_id": i, "event_date": format!("2024-05-{:02}", i + 1)}))
            .collect(),
    );
    let context = AnalysisContext::new("What happened recently among recent users?")
        .with_dataset(RawDataset::from_bare(["user_id", "event_date"], rows));

    let report = coordinator().analyze(&context);

    assert!(report
        .sql_preview
        .contains("WHERE event_date >= CURRENT_DATE - INTERVAL '30 days'"));
    assert_eq!(report.query_breakdown.len(), 5);
}

#[test]
fn test_report_ids_unique() {
    let rows = records(vec![json!({"a": 1})]);
    let context = AnalysisContext::new("Summarize").with_dataset(RawDataset::from_bare(["a"], rows));
    let coordinator = coordinator();

    let first = coordinator.analyze(&context);
    let second = coordinator.analyze(&context);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_concurrent_analyses() {
    let coordinator = std::sync::Arc::new(coordinator());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let coordinator = coordinator.clone();
            std::thread::spawn(move || {
                let rows = records((0..20).map(|i| json!({"v": i * n})).collect());
                let context = AnalysisContext::new("Summarize")
                    .with_dataset(RawDataset::from_bare(["v"], rows));
                coordinator.analyze(&context)
            })
        })
        .collect();

    for handle in handles {
        let report = handle.join().unwrap();
        assert!(report.data_quality.is_valid);
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_caps_results() {
    let file = create_test_file(r#"{"report": {"max_numerical_results": 1}}"#);
    let config = AnalysisConfig::load(file.path()).unwrap();
    assert_eq!(config.report.max_numerical_results, 1);

    let rows = records((0..10).map(|i| json!({"a": i, "b": i + 1, "c": i + 2})).collect());
    let context = AnalysisContext::new("Summarize")
        .with_dataset(RawDataset::from_bare(["a", "b", "c"], rows));
    let report = AnalysisCoordinator::with_config(config)
        .with_logger(NullLogger)
        .analyze(&context);

    let stats = report
        .results
        .iter()
        .filter(|r| r.result_type == ResultType::Statistic)
        .count();
    assert_eq!(stats, 1);
}

#[test]
fn test_invalid_config_rejected() {
    let file = create_test_file(r#"{"inference": {"numeric_threshold": 2.0}}"#);
    assert!(AnalysisConfig::load(file.path()).is_err());
}
