//! Natural-language insights and recommendations.

mod narrator;

pub use narrator::{InsightNarrator, Narrative, NarrativeInput, EXPORT_RECOMMENDATION};
