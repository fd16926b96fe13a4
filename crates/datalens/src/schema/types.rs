//! Semantic column types assigned during an analysis.

use serde::{Deserialize, Serialize};

/// Inferred meaning of a column, distinct from its storage form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Measured quantities.
    Numerical,
    /// Discrete labels.
    Categorical,
    /// Dates and timestamps.
    Temporal,
    /// Two-valued flags.
    Boolean,
}

impl SemanticType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SemanticType::Numerical => "numerical",
            SemanticType::Categorical => "categorical",
            SemanticType::Temporal => "temporal",
            SemanticType::Boolean => "boolean",
        }
    }
}

/// A column together with its inferred semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedColumn {
    /// Column name.
    pub name: String,
    /// Zero-based position in the dataset.
    pub position: usize,
    /// Inferred semantic type.
    pub semantic_type: SemanticType,
    /// Confidence in the classification (0.0-1.0).
    pub confidence: f64,
    /// Up to five sampled values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<String>,
}

/// Columns grouped by semantic type, each group in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBuckets {
    pub numerical: Vec<TypedColumn>,
    pub categorical: Vec<TypedColumn>,
    pub temporal: Vec<TypedColumn>,
    pub boolean: Vec<TypedColumn>,
}

impl TypeBuckets {
    /// Place a column in the bucket for its type.
    pub fn push(&mut self, column: TypedColumn) {
        match column.semantic_type {
            SemanticType::Numerical => self.numerical.push(column),
            SemanticType::Categorical => self.categorical.push(column),
            SemanticType::Temporal => self.temporal.push(column),
            SemanticType::Boolean => self.boolean.push(column),
        }
    }

    /// Get the bucket for a type.
    pub fn of(&self, semantic_type: SemanticType) -> &[TypedColumn] {
        match semantic_type {
            SemanticType::Numerical => &self.numerical,
            SemanticType::Categorical => &self.categorical,
            SemanticType::Temporal => &self.temporal,
            SemanticType::Boolean => &self.boolean,
        }
    }

    /// Total number of classified columns.
    pub fn len(&self) -> usize {
        self.numerical.len() + self.categorical.len() + self.temporal.len() + self.boolean.len()
    }

    /// Check if no column was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a classified column by name.
    pub fn find(&self, name: &str) -> Option<&TypedColumn> {
        self.numerical
            .iter()
            .chain(&self.categorical)
            .chain(&self.temporal)
            .chain(&self.boolean)
            .find(|c| c.name == name)
    }
}
