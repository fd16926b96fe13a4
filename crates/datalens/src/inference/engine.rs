//! Semantic type inference from sampled column values.

use crate::config::InferenceConfig;
use crate::input::Dataset;
use crate::schema::{SemanticType, TypeBuckets, TypedColumn};

use super::sample::SampleProfile;

/// Name fragments that mark a column as temporal regardless of its values.
const TEMPORAL_NAME_HINTS: &[&str] = &["date", "time", "timestamp", "created", "updated"];

/// Classifies every column of a dataset into a semantic type.
///
/// Classification is first-match: numerical, then temporal, then boolean,
/// falling back to categorical. Pure and deterministic.
pub struct TypeInferenceEngine {
    config: InferenceConfig,
}

impl TypeInferenceEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Classify all columns of a dataset.
    ///
    /// Columns without a single non-empty sample land in no bucket.
    pub fn infer(&self, dataset: &Dataset) -> TypeBuckets {
        let mut buckets = TypeBuckets::default();

        for (position, column) in dataset.columns.iter().enumerate() {
            if let Some(typed) = self.classify_column(dataset, position, &column.name) {
                buckets.push(typed);
            }
        }

        buckets
    }

    /// Classify a single column.
    pub fn classify_column(
        &self,
        dataset: &Dataset,
        position: usize,
        name: &str,
    ) -> Option<TypedColumn> {
        let profile =
            SampleProfile::from_values(dataset.column_values(position), self.config.sample_size);
        if profile.is_empty() {
            return None;
        }

        let (semantic_type, confidence) = self.classify_profile(&profile, name);

        Some(TypedColumn {
            name: name.to_string(),
            position,
            semantic_type,
            confidence: confidence.clamp(0.0, 1.0),
            samples: profile.samples,
        })
    }

    /// Apply the first-match rules to a profile.
    fn classify_profile(&self, profile: &SampleProfile, name: &str) -> (SemanticType, f64) {
        let numeric = profile.numeric_ratio();
        let dates = profile.date_ratio();
        let booleans = profile.boolean_ratio();

        if numeric > self.config.numeric_threshold {
            return (SemanticType::Numerical, numeric);
        }

        let name_hint = has_temporal_name(name);
        if dates > self.config.date_threshold || name_hint {
            let confidence = if name_hint {
                dates.max(self.config.name_match_confidence)
            } else {
                dates
            };
            return (SemanticType::Temporal, confidence);
        }

        if booleans > self.config.boolean_threshold {
            return (SemanticType::Boolean, booleans);
        }

        let strongest = numeric.max(dates).max(booleans);
        (SemanticType::Categorical, 1.0 - strongest)
    }
}

impl Default for TypeInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn has_temporal_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    TEMPORAL_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}
