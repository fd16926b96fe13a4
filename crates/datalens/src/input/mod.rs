//! Input contract, canonical dataset and normalization.

mod context;
mod dataset;
mod normalize;
pub mod scalar;

pub use context::AnalysisContext;
pub use dataset::{Column, ColumnDescriptor, ColumnSpec, Dataset, RawDataset, Record, StorageType};
pub use normalize::{ColumnHints, NormalizedDataset, Normalizer};
