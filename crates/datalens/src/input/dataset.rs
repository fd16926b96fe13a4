//! Raw input datasets and the canonical in-memory table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::scalar;

/// One input row: column name to scalar.
pub type Record = Map<String, Value>;

/// Coarse storage form of a column, independent of its semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Free text.
    String,
    /// Numbers.
    Number,
    /// Dates or timestamps.
    Date,
}

impl StorageType {
    /// Map a declared type label onto a storage type.
    ///
    /// Returns `None` for labels that say nothing useful, in which case the
    /// column is typed by sampling.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "string" | "text" | "str" | "varchar" | "char" | "categorical" | "boolean"
            | "bool" => Some(StorageType::String),
            "number" | "numeric" | "integer" | "int" | "float" | "double" | "decimal"
            | "real" => Some(StorageType::Number),
            "date" | "datetime" | "timestamp" | "time" => Some(StorageType::Date),
            _ => None,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StorageType::String => "string",
            StorageType::Number => "number",
            StorageType::Date => "date",
        }
    }
}

/// A column descriptor as supplied by the decoding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Declared type label, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl ColumnDescriptor {
    /// Create a descriptor with a declared type.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
        }
    }
}

/// The two shapes a column list arrives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Plain column names.
    Bare(Vec<String>),
    /// `{name, type}` descriptors.
    Descriptors(Vec<ColumnDescriptor>),
}

impl ColumnSpec {
    /// Number of declared columns.
    pub fn len(&self) -> usize {
        match self {
            ColumnSpec::Bare(names) => names.len(),
            ColumnSpec::Descriptors(descriptors) => descriptors.len(),
        }
    }

    /// Check if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        ColumnSpec::Bare(Vec::new())
    }
}

/// A dataset exactly as received, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    /// Display name of the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared columns.
    #[serde(default)]
    pub columns: ColumnSpec,
    /// Rows in source order.
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl RawDataset {
    /// Create a dataset from bare column names.
    pub fn from_bare<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Record>,
    ) -> Self {
        Self {
            name: None,
            columns: ColumnSpec::Bare(columns.into_iter().map(Into::into).collect()),
            rows,
        }
    }

    /// Create a dataset from column descriptors.
    pub fn from_descriptors(columns: Vec<ColumnDescriptor>, rows: Vec<Record>) -> Self {
        Self {
            name: None,
            columns: ColumnSpec::Descriptors(columns),
            rows,
        }
    }

    /// Set the dataset name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A column of the canonical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name (unique within the dataset).
    pub name: String,
    /// Coarse storage type.
    #[serde(rename = "type")]
    pub storage_type: StorageType,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, storage_type: StorageType) -> Self {
        Self {
            name: name.into(),
            storage_type,
        }
    }
}

/// The canonical table analyzed by the engine.
///
/// Rows are positional and aligned with `columns`, so every row key is a
/// declared column by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Display name.
    pub name: String,
    /// Ordered columns.
    pub columns: Vec<Column>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a new dataset. Short rows are padded with nulls and long rows
    /// truncated to the column count.
    pub fn new(name: impl Into<String>, columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Null))
    }

    /// Get a column's values by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Pair up two columns row by row.
    pub fn column_pairs(&self, a: usize, b: usize) -> impl Iterator<Item = (&Value, &Value)> {
        self.column_values(a).zip(self.column_values(b))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Count non-empty cells in the leading `limit` rows (all rows if `None`).
    ///
    /// Returns `(filled, total)`.
    pub fn filled_cells(&self, limit: Option<usize>) -> (usize, usize) {
        let rows = limit.unwrap_or(self.rows.len()).min(self.rows.len());
        let total = rows * self.columns.len();
        let filled = self.rows[..rows]
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| !scalar::is_empty(v))
            .count();
        (filled, total)
    }
}
