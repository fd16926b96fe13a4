//! Numeric, categorical, temporal and correlation metrics.
//!
//! Every function is pure and returns `None` when the data cannot support the
//! metric; callers treat that as a silent omission.

use indexmap::IndexMap;
use serde_json::Value;

use crate::input::scalar;

use super::metrics::{
    CategoricalMetrics, CategoryCount, CorrelationDirection, CorrelationMetrics,
    CorrelationStrength, StatisticalMetrics, TemporalMetrics,
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Default minimum number of numeric pairs for a correlation.
pub const DEFAULT_MIN_CORRELATION_PAIRS: usize = 5;

// =============================================================================
// STREAMING STATISTICS
// =============================================================================
// Welford's online algorithm for computing mean and variance in a single pass.

/// Streaming statistics accumulator using Welford's algorithm.
#[derive(Debug, Clone)]
struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
    min: f64,
    max: f64,
}

impl StreamingStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Population variance (divides by N).
    fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }

    fn finish(&self) -> Option<StatisticalMetrics> {
        if self.count == 0 {
            return None;
        }

        let std = self.variance().sqrt();
        Some(StatisticalMetrics {
            // Rounding must never push the mean outside the observed range.
            average: self.mean.clamp(self.min, self.max),
            minimum: self.min,
            maximum: self.max,
            standard_deviation: if std.is_finite() { std } else { 0.0 },
            count: self.count,
        })
    }
}

/// Computes column metrics.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    min_correlation_pairs: usize,
}

impl StatisticsEngine {
    /// Create an engine with the default correlation minimum.
    pub fn new() -> Self {
        Self {
            min_correlation_pairs: DEFAULT_MIN_CORRELATION_PAIRS,
        }
    }

    /// Set the minimum numeric pairs for a correlation (at least 2).
    pub fn with_min_correlation_pairs(mut self, pairs: usize) -> Self {
        self.min_correlation_pairs = pairs.max(2);
        self
    }

    /// Mean, population standard deviation and range of the finite numbers.
    pub fn numerical<'a>(
        &self,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Option<StatisticalMetrics> {
        let mut stats = StreamingStats::new();
        for number in values.into_iter().filter_map(scalar::as_number) {
            stats.add(number);
        }
        stats.finish()
    }

    /// Category frequencies of the non-empty values.
    pub fn categorical<'a>(
        &self,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Option<CategoricalMetrics> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut total = 0usize;

        for text in values.into_iter().filter_map(scalar::as_text) {
            *counts.entry(text.into_owned()).or_insert(0) += 1;
            total += 1;
        }

        if total == 0 {
            return None;
        }

        // Stable sort keeps first-occurrence order among equal counts.
        let mut frequencies: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(value, count)| CategoryCount { value, count })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count));

        let unique = frequencies.len();
        let top = &frequencies[0];

        Some(CategoricalMetrics {
            unique_categories: unique,
            total_records: total,
            top_category: top.value.clone(),
            top_count: top.count,
            diversity: unique as f64 / total as f64,
            frequencies,
        })
    }

    /// Earliest, latest and span of the values that parse as dates.
    pub fn temporal<'a>(
        &self,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Option<TemporalMetrics> {
        let mut dates = values.into_iter().filter_map(scalar::as_date);
        let first = dates.next()?;

        let (mut earliest, mut latest, mut count) = (first, first, 1usize);
        for date in dates {
            earliest = earliest.min(date);
            latest = latest.max(date);
            count += 1;
        }

        let span_ms = (latest - earliest).num_milliseconds();
        // Ceiling division; span_ms is never negative here.
        let day_span = (span_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

        Some(TemporalMetrics {
            earliest,
            latest,
            day_span,
            valid_date_count: count,
        })
    }

    /// Pearson correlation over the rows where both values are numeric.
    pub fn correlation<'a>(
        &self,
        pairs: impl IntoIterator<Item = (&'a Value, &'a Value)>,
    ) -> Option<CorrelationMetrics> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs
            .into_iter()
            .filter_map(|(x, y)| Some((scalar::as_number(x)?, scalar::as_number(y)?)))
            .unzip();

        if xs.len() < self.min_correlation_pairs {
            return None;
        }

        let r = pearson(&xs, &ys);
        Some(CorrelationMetrics {
            correlation_coefficient: r,
            strength: CorrelationStrength::from_coefficient(r),
            direction: CorrelationDirection::from_coefficient(r),
            pair_count: xs.len(),
        })
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Pearson's r over centered, rescaled deviations.
///
/// Returns 0 when either side has no variance or holds a non-finite value, and
/// clamps into [-1, 1]. Extra values on the longer side are ignored.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    let (Some(dx), Some(dy)) = (deviations(&xs[..n]), deviations(&ys[..n])) else {
        return 0.0;
    };

    let (mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0);
    for (x, y) in dx.iter().zip(&dy) {
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let denominator = (sum_x2 * sum_y2).sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return 0.0;
    }

    let r = sum_xy / denominator;
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Deviations from the mean divided by the largest one, so every entry lies in
/// [-1, 1]. `None` for an empty or constant column.
fn deviations(values: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() || !values.iter().all(|v| v.is_finite()) {
        return None;
    }

    let (mut mean, mut min, mut max) = (0.0, f64::INFINITY, f64::NEG_INFINITY);
    for (i, &value) in values.iter().enumerate() {
        mean += (value - mean) / (i + 1) as f64;
        min = min.min(value);
        max = max.max(value);
    }
    // A constant column lands exactly on its value here.
    let mean = mean.clamp(min, max);

    let scale = values
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    Some(values.iter().map(|v| (v - mean) / scale).collect())
}
