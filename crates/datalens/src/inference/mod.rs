//! Inference engine for semantic column types.

mod engine;
mod sample;

pub use engine::TypeInferenceEngine;
pub use sample::SampleProfile;
