//! Schema types for representing inferred column semantics.

mod types;

pub use types::{SemanticType, TypeBuckets, TypedColumn};
