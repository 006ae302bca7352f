//! Statistics over conditional-probability curves.
//!
//! Summarizes how much P(high within H | k consecutive lows) varies with k
//! for each cut. A flat curve hugging the baseline frequency suggests no
//! exploitable dependence at that cut; a wide range is worth a closer look.

use crate::trend::ConditionalTable;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics of one conditional-probability curve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrendStats {
    /// The cut threshold the curve belongs to
    pub cut: f64,
    /// The horizon the curve was evaluated at
    pub horizon: usize,
    /// Number of defined k entries that entered the statistics
    pub n_k: usize,
    /// Mean of the probabilities, `None` when the curve is empty
    pub mean: Option<f64>,
    /// Population standard deviation
    pub std: Option<f64>,
    /// Population variance
    pub var: Option<f64>,
    /// Smallest probability
    pub min: Option<f64>,
    /// Largest probability
    pub max: Option<f64>,
    /// max - min
    pub range: Option<f64>,
}

/// Summarize a k -> probability curve for one (cut, horizon).
///
/// Undersampled entries must already be absent from the input; they are
/// never treated as zero here.
pub fn summarize_prob_curve(curve: &BTreeMap<usize, f64>, cut: f64, horizon: usize) -> TrendStats {
    if curve.is_empty() {
        return TrendStats {
            cut,
            horizon,
            n_k: 0,
            mean: None,
            std: None,
            var: None,
            min: None,
            max: None,
            range: None,
        };
    }
    let values: Vec<f64> = curve.values().cloned().collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    TrendStats {
        cut,
        horizon,
        n_k: values.len(),
        mean: Some(mean),
        std: Some(var.sqrt()),
        var: Some(var),
        min: Some(min),
        max: Some(max),
        range: Some(max - min),
    }
}

/// One summary row per cut at the target horizon, sorted by cut.
///
/// Cuts whose table has no curve at `h_target` still get a row with
/// `n_k = 0` and undefined moments, so the ranking stays complete.
pub fn stats_table_for_cuts(table: &ConditionalTable, h_target: usize) -> Vec<TrendStats> {
    let empty = BTreeMap::new();
    let mut rows: Vec<TrendStats> = table
        .curves
        .iter()
        .map(|cc| {
            let curve = cc.by_horizon.get(&h_target).unwrap_or(&empty);
            summarize_prob_curve(curve, cc.cut, h_target)
        })
        .collect();
    rows.sort_by(|a, b| a.cut.partial_cmp(&b.cut).unwrap_or(std::cmp::Ordering::Equal));
    rows
}
