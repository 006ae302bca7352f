//! Ordinal classification of outcomes into LOW / MID / HIGH.
//!
//! A pure, deterministic mapping driven by two validated thresholds. The
//! pattern engine operates entirely on the classified sequence, so large
//! sweeps classify once per threshold pair and reuse the result.

use crate::errors::{AuditError, AuditResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordinal outcome category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// v < low_th
    Low,
    /// low_th <= v < high_th
    Mid,
    /// v >= high_th
    High,
}

/// Validated threshold pair with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    low: f64,
    high: f64,
}

impl Thresholds {
    /// Construct a threshold pair, rejecting non-finite values and
    /// `low >= high`.
    pub fn new(low: f64, high: f64) -> AuditResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(AuditError::InvalidParameter {
                parameter: "thresholds".to_string(),
                value: if low.is_finite() { high } else { low },
                constraint: "must be finite".to_string(),
            });
        }
        if low >= high {
            return Err(AuditError::InvalidParameter {
                parameter: "low_th".to_string(),
                value: low,
                constraint: format!("must be < high_th ({})", high),
            });
        }
        Ok(Self { low, high })
    }

    /// Lower threshold.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper threshold.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Classify a single value.
    pub fn classify_value(&self, v: f64) -> Category {
        if v < self.low {
            Category::Low
        } else if v < self.high {
            Category::Mid
        } else {
            Category::High
        }
    }
}

/// Classify a whole series in one pass.
pub fn classify(data: &[f64], thresholds: &Thresholds) -> Vec<Category> {
    data.iter().map(|&v| thresholds.classify_value(v)).collect()
}

/// Relative frequency of each category.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassFrequencies {
    /// Share of LOW outcomes
    pub low: f64,
    /// Share of MID outcomes
    pub mid: f64,
    /// Share of HIGH outcomes
    pub high: f64,
}

/// Relative frequency of each category; `None` for an empty sequence.
pub fn class_frequencies(cats: &[Category]) -> Option<ClassFrequencies> {
    if cats.is_empty() {
        return None;
    }
    let n = cats.len() as f64;
    let mut counts = [0usize; 3];
    for &c in cats {
        match c {
            Category::Low => counts[0] += 1,
            Category::Mid => counts[1] += 1,
            Category::High => counts[2] += 1,
        }
    }
    Some(ClassFrequencies {
        low: counts[0] as f64 / n,
        mid: counts[1] as f64 / n,
        high: counts[2] as f64 / n,
    })
}
