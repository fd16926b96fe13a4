//! Leading-row value sampling shared by type inference and normalization.

use serde_json::Value;

use crate::input::scalar;

/// Sample values retained for display.
const MAX_DISPLAY_SAMPLES: usize = 5;

/// Shape ratios over the first non-empty values of a column.
///
/// Samples are drawn in row order with no shuffling, so a column whose early
/// rows differ from the rest is judged by its early rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleProfile {
    /// Number of non-empty values sampled.
    pub sampled: usize,
    /// Values that are finite numbers.
    pub numeric: usize,
    /// Values that parse as dates after 1900.
    pub dates: usize,
    /// Values that are boolean tokens.
    pub booleans: usize,
    /// Up to five sampled values, as text.
    pub samples: Vec<String>,
}

impl SampleProfile {
    /// Profile the first `limit` non-empty values.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>, limit: usize) -> Self {
        let mut profile = SampleProfile::default();

        for value in values
            .into_iter()
            .filter(|v| !scalar::is_empty(v))
            .take(limit)
        {
            profile.sampled += 1;

            if scalar::as_number(value).is_some() {
                profile.numeric += 1;
            }
            if scalar::as_date(value).is_some() {
                profile.dates += 1;
            }
            if scalar::is_boolean_token(value) {
                profile.booleans += 1;
            }

            if profile.samples.len() < MAX_DISPLAY_SAMPLES {
                if let Some(text) = scalar::as_text(value) {
                    profile.samples.push(text.into_owned());
                }
            }
        }

        profile
    }

    /// Check if no values qualified.
    pub fn is_empty(&self) -> bool {
        self.sampled == 0
    }

    /// Share of samples that are numeric.
    pub fn numeric_ratio(&self) -> f64 {
        self.ratio(self.numeric)
    }

    /// Share of samples that are dates.
    pub fn date_ratio(&self) -> f64 {
        self.ratio(self.dates)
    }

    /// Share of samples that are boolean tokens.
    pub fn boolean_ratio(&self) -> f64 {
        self.ratio(self.booleans)
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.sampled == 0 {
            0.0
        } else {
            count as f64 / self.sampled as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_skips_empty_and_limits() {
        let values = vec![
            json!(null),
            json!("1"),
            json!(""),
            json!("2"),
            json!("x"),
            json!("3"),
        ];
        let profile = SampleProfile::from_values(&values, 3);

        assert_eq!(profile.sampled, 3);
        assert_eq!(profile.numeric, 2);
        assert_eq!(profile.samples, vec!["1", "2", "x"]);
    }

    #[test]
    fn test_ratios() {
        let values = vec![json!("2024-01-01"), json!("2024-02-01"), json!("soon"), json!("yes")];
        let profile = SampleProfile::from_values(&values, 20);

        assert_eq!(profile.date_ratio(), 0.5);
        assert_eq!(profile.boolean_ratio(), 0.25);
        assert_eq!(profile.numeric_ratio(), 0.0);
    }

    #[test]
    fn test_empty_profile() {
        let values = vec![json!(null), json!(" ")];
        let profile = SampleProfile::from_values(&values, 20);
        assert!(profile.is_empty());
        assert_eq!(profile.numeric_ratio(), 0.0);
    }
}
