//! Numeric coercion and basic summary metrics.
//!
//! The ingestion collaborators hand this crate raw values; coercion turns them
//! into a clean ordered series of finite floats, dropping anything invalid.
//! Empty output is legal — downstream tests represent that as undefined
//! results rather than errors.

use crate::math_utils::{histogram_counts, histogram_entropy_bits, mean, median, population_std};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bin count used for the summary entropy histogram.
const ENTROPY_BINS: usize = 256;

/// Drop non-finite values, preserving order.
pub fn clean_series(values: &[f64]) -> Vec<f64> {
    values.iter().cloned().filter(|v| v.is_finite()).collect()
}

/// Parse number-like strings into a clean series, dropping anything that does
/// not parse to a finite float. Order preserved, no error on empty input.
pub fn parse_series<I, S>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|s| s.as_ref().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Basic summary metrics of a cleaned series.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesSummary {
    /// Number of observations
    pub n: usize,
    /// Arithmetic mean, `None` when empty
    pub mean: Option<f64>,
    /// Median, `None` when empty
    pub median: Option<f64>,
    /// Population standard deviation, `None` when empty
    pub std: Option<f64>,
    /// Minimum, `None` when empty
    pub min: Option<f64>,
    /// Maximum, `None` when empty
    pub max: Option<f64>,
    /// Shannon entropy in bits over a 256-bin histogram of the
    /// min-max-normalized series; `None` when empty, exactly 0 when constant
    pub entropy_bits: Option<f64>,
}

/// Compute basic summary metrics. All fields are `None` for an empty series.
pub fn basic_metrics(data: &[f64]) -> SeriesSummary {
    if data.is_empty() {
        return SeriesSummary {
            n: 0,
            mean: None,
            median: None,
            std: None,
            min: None,
            max: None,
            entropy_bits: None,
        };
    }
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let entropy = if max == min {
        // Constant series carries no uncertainty
        Some(0.0)
    } else {
        histogram_entropy_bits(&histogram_counts(data, ENTROPY_BINS))
    };
    SeriesSummary {
        n: data.len(),
        mean: Some(mean(data)),
        median: Some(median(data)),
        std: Some(population_std(data)),
        min: Some(min),
        max: Some(max),
        entropy_bits: entropy,
    }
}
