//! Conversion of raw input into the canonical [`Dataset`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::InferenceConfig;
use crate::inference::SampleProfile;

use super::dataset::{Column, ColumnSpec, Dataset, RawDataset, StorageType};
use super::scalar;

// Advisory name patterns, compiled once on first use.

static IDENTIFIER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(user|account|customer|client|member)|(^|[_\s-])id$").unwrap()
});

static EVENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(event|action|activity|type|status|category|step)").unwrap()
});

static DATE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(date|time|timestamp|created|updated|(^|[_\s-])at$)").unwrap()
});

/// Rows inspected when deciding whether values look like dates.
const DATE_HINT_ROWS: usize = 5;

/// Advisory column lists derived from names and a few values.
///
/// These are hints for report wording and the SQL preview, not guarantees
/// about the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHints {
    /// Columns that look like user or account identifiers.
    pub identifier_columns: Vec<String>,
    /// Columns that look like event or action labels.
    pub event_columns: Vec<String>,
    /// Columns that look like dates or times.
    pub date_columns: Vec<String>,
}

/// Output of normalization.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    /// The canonical dataset.
    pub dataset: Dataset,
    /// Advisory column lists.
    pub hints: ColumnHints,
    /// Data quality notes raised while normalizing.
    pub notes: Vec<String>,
}

/// Converts a [`RawDataset`] into the canonical shape.
pub struct Normalizer<'a> {
    config: &'a InferenceConfig,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer using the given sampling settings.
    pub fn new(config: &'a InferenceConfig) -> Self {
        Self { config }
    }

    /// Normalize a raw dataset.
    pub fn normalize(&self, raw: &RawDataset) -> NormalizedDataset {
        let mut notes = Vec::new();

        // Resolve the column spec once; downstream code only sees `Column`s.
        let mut declared: Vec<(String, Option<StorageType>)> = match &raw.columns {
            ColumnSpec::Bare(names) => names.iter().map(|n| (n.clone(), None)).collect(),
            ColumnSpec::Descriptors(descriptors) => descriptors
                .iter()
                .map(|d| {
                    let storage = d.declared_type.as_deref().and_then(StorageType::from_label);
                    (d.name.clone(), storage)
                })
                .collect(),
        };

        if declared.is_empty() {
            if let Some(first) = raw.rows.first() {
                declared = first.keys().map(|k| (k.clone(), None)).collect();
                if !declared.is_empty() {
                    notes.push(format!(
                        "No columns were declared; {} columns were taken from the first row",
                        declared.len()
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        declared.retain(|(name, _)| {
            if seen.insert(name.clone()) {
                true
            } else {
                duplicates.push(name.clone());
                false
            }
        });
        if !duplicates.is_empty() {
            notes.push(format!(
                "Duplicate column names were dropped: {}",
                duplicates.join(", ")
            ));
        }

        // Project records onto the declared columns.
        let mut undeclared_fields = 0usize;
        let rows: Vec<Vec<Value>> = raw
            .rows
            .iter()
            .map(|record| {
                undeclared_fields += record.keys().filter(|k| !seen.contains(*k)).count();
                declared
                    .iter()
                    .map(|(name, _)| record.get(name).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        if undeclared_fields > 0 {
            notes.push(format!(
                "{} row field(s) not declared as columns were ignored",
                undeclared_fields
            ));
        }

        let columns: Vec<Column> = declared
            .iter()
            .enumerate()
            .map(|(idx, (name, storage))| {
                let storage = storage.unwrap_or_else(|| self.coarse_type(&rows, idx));
                Column::new(name.clone(), storage)
            })
            .collect();

        let name = raw.name.clone().unwrap_or_else(|| "dataset".to_string());
        let dataset = Dataset::new(name, columns, rows);
        let hints = derive_hints(&dataset);

        NormalizedDataset {
            dataset,
            hints,
            notes,
        }
    }

    /// Type an undeclared column from its leading values.
    fn coarse_type(&self, rows: &[Vec<Value>], idx: usize) -> StorageType {
        let values = rows.iter().filter_map(|row| row.get(idx));
        let profile = SampleProfile::from_values(values, self.config.sample_size);

        if profile.numeric_ratio() > self.config.numeric_threshold {
            StorageType::Number
        } else if profile.date_ratio() > self.config.date_threshold {
            StorageType::Date
        } else {
            StorageType::String
        }
    }
}

/// Derive the advisory column lists.
fn derive_hints(dataset: &Dataset) -> ColumnHints {
    let mut hints = ColumnHints::default();

    for (idx, column) in dataset.columns.iter().enumerate() {
        if IDENTIFIER_NAME.is_match(&column.name) {
            hints.identifier_columns.push(column.name.clone());
        }
        if EVENT_NAME.is_match(&column.name) {
            hints.event_columns.push(column.name.clone());
        }
        if DATE_NAME.is_match(&column.name)
            || column.storage_type == StorageType::Date
            || values_look_like_dates(dataset, idx)
        {
            hints.date_columns.push(column.name.clone());
        }
    }

    hints
}

/// At least half of the non-empty values in the first few rows parse as dates.
fn values_look_like_dates(dataset: &Dataset, idx: usize) -> bool {
    let sample: Vec<&Value> = dataset
        .column_values(idx)
        .take(DATE_HINT_ROWS)
        .filter(|v| !scalar::is_empty(v))
        .collect();

    if sample.is_empty() {
        return false;
    }

    let dates = sample.iter().filter(|v| scalar::as_date(v).is_some()).count();
    dates * 2 >= sample.len()
}
