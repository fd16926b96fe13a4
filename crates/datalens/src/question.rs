//! Keyword reading of the research question.
//!
//! The question is inspected once per analysis; every component downstream
//! asks the resulting [`QuestionProfile`] instead of re-scanning the text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pure row/column count asks, e.g. "How many rows are there?".
static COUNT_QUESTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(how\s+many|count(\s+the)?|(what\s+is\s+the\s+)?(total\s+)?(number|count)\s+of)\b.*\b(rows?|records?|entries|entry|lines?|columns?|fields?)\b",
    )
    .unwrap()
});

/// Words that turn a count question into a real analysis.
static ANALYTIC_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(trend|time|correlat|relationship|segment|group|compare|distribution|average|breakdown|per\s)")
        .unwrap()
});

/// What the research question asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionProfile {
    /// Mentions "trend" or "time".
    pub wants_trend: bool,
    /// Mentions "correlation" or "relationship".
    pub wants_relationship: bool,
    /// Mentions "correlation" itself.
    pub mentions_correlation: bool,
    /// Mentions "segment" or "group".
    pub wants_segments: bool,
    /// Mentions "recent".
    pub wants_recent: bool,
    /// Only asks for a row or column count.
    pub is_simple: bool,
}

impl QuestionProfile {
    /// Read a question.
    pub fn from_question(question: &str) -> Self {
        let lower = question.to_lowercase();
        let has = |word: &str| lower.contains(word);

        Self {
            wants_trend: has("trend") || has("time"),
            wants_relationship: has("correlation") || has("relationship"),
            mentions_correlation: has("correlation"),
            wants_segments: has("segment") || has("group"),
            wants_recent: has("recent"),
            is_simple: COUNT_QUESTION.is_match(question) && !ANALYTIC_WORDS.is_match(question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let profile = QuestionProfile::from_question("What's the TREND in recent sales by Group?");
        assert!(profile.wants_trend);
        assert!(profile.wants_recent);
        assert!(profile.wants_segments);
        assert!(!profile.wants_relationship);
        assert!(!profile.is_simple);
    }

    #[test]
    fn test_relationship_without_correlation() {
        let profile = QuestionProfile::from_question("Is there a relationship between price and units?");
        assert!(profile.wants_relationship);
        assert!(!profile.mentions_correlation);
    }

    #[test]
    fn test_simple_count_questions() {
        for question in [
            "How many rows are there?",
            "how many records do we have",
            "Count the rows",
            "What is the number of columns?",
            "Total number of entries",
        ] {
            assert!(QuestionProfile::from_question(question).is_simple, "{}", question);
        }
    }

    #[test]
    fn test_count_with_analysis_is_not_simple() {
        for question in [
            "How many records per region?",
            "How many rows over time?",
            "How many users churned?",
            "Describe the dataset",
        ] {
            assert!(!QuestionProfile::from_question(question).is_simple, "{}", question);
        }
    }
}
