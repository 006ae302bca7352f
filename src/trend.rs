//! Conditional pattern engine: empirical probabilities of a HIGH outcome
//! within a horizon, conditioned on preceding run or pattern structure, plus
//! the sliding-window signal detector and the binary-cut sweep.
//!
//! Every scan is a single forward pass per parameter combination. Run
//! conditions are tracked with an incremental trailing-streak counter and a
//! precomputed next-high index, so a full conditional-curve sweep costs
//! O(n + k_max) per (cut, horizon) instead of re-scanning windows.

use crate::categories::Category;
use crate::errors::{AuditError, AuditResult, validate_positive};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Empirical conditional probability with its sample counts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternProbability {
    /// Number of qualifying instances (trials)
    pub total: usize,
    /// Trials followed by a HIGH outcome within the horizon
    pub hits: usize,
    /// hits / total; `None` when there were no trials (never 0)
    pub prob: Option<f64>,
}

impl PatternProbability {
    fn from_counts(total: usize, hits: usize) -> Self {
        let prob = if total > 0 {
            Some(hits as f64 / total as f64)
        } else {
            None
        };
        Self { total, hits, prob }
    }
}

/// Trailing-streak array: `streak[i]` is the length of the run of positions
/// satisfying `cond` that ends immediately before index i.
fn trailing_streaks(cond: &[bool]) -> Vec<usize> {
    let mut streak = vec![0usize; cond.len() + 1];
    for i in 0..cond.len() {
        streak[i + 1] = if cond[i] { streak[i] + 1 } else { 0 };
    }
    streak
}

/// Next-high index array: `next[i]` is the smallest j >= i with `high[j]`,
/// or n when no such position exists.
fn next_high_index(high: &[bool]) -> Vec<usize> {
    let n = high.len();
    let mut next = vec![n; n + 1];
    for i in (0..n).rev() {
        next[i] = if high[i] { i } else { next[i + 1] };
    }
    next
}

/// Core conditional scan: at every index i with i >= k and i + h <= n, the
/// instance qualifies when the k positions before i all satisfy `cond`;
/// it hits when a `high` position occurs in [i, i+h).
fn conditional_scan(cond: &[bool], high: &[bool], k: usize, h: usize) -> PatternProbability {
    debug_assert_eq!(cond.len(), high.len());
    let n = cond.len();
    if n < k + h {
        return PatternProbability::from_counts(0, 0);
    }
    let streak = trailing_streaks(cond);
    let next = next_high_index(high);
    let mut total = 0;
    let mut hits = 0;
    for i in k..=(n - h) {
        if streak[i] >= k {
            total += 1;
            if next[i] < i + h {
                hits += 1;
            }
        }
    }
    PatternProbability::from_counts(total, hits)
}

/// P(HIGH within the next `horizon` steps | the preceding k steps all belong
/// to `category`).
pub fn p_high_after_run(
    cats: &[Category],
    category: Category,
    k: usize,
    horizon: usize,
) -> AuditResult<PatternProbability> {
    validate_positive(k, "k")?;
    validate_positive(horizon, "horizon")?;
    let cond: Vec<bool> = cats.iter().map(|&c| c == category).collect();
    let high: Vec<bool> = cats.iter().map(|&c| c == Category::High).collect();
    Ok(conditional_scan(&cond, &high, k, horizon))
}

/// P(HIGH within the next `horizon` steps | k consecutive LOW outcomes).
pub fn p_high_after_k_lows(
    cats: &[Category],
    k: usize,
    horizon: usize,
) -> AuditResult<PatternProbability> {
    p_high_after_run(cats, Category::Low, k, horizon)
}

/// P(HIGH within the next `horizon` steps | the preceding steps exactly match
/// `pattern`). Identical mechanics with an explicit category sequence.
pub fn p_high_after_pattern(
    cats: &[Category],
    pattern: &[Category],
    horizon: usize,
) -> AuditResult<PatternProbability> {
    validate_positive(horizon, "horizon")?;
    if pattern.is_empty() {
        return Err(AuditError::InvalidParameter {
            parameter: "pattern".to_string(),
            value: 0.0,
            constraint: "must be non-empty".to_string(),
        });
    }
    let m = pattern.len();
    let n = cats.len();
    if n < m + horizon {
        return Ok(PatternProbability::from_counts(0, 0));
    }
    let high: Vec<bool> = cats.iter().map(|&c| c == Category::High).collect();
    let next = next_high_index(&high);
    let mut total = 0;
    let mut hits = 0;
    for i in m..=(n - horizon) {
        if cats[i - m..i] == *pattern {
            total += 1;
            if next[i] < i + horizon {
                hits += 1;
            }
        }
    }
    Ok(PatternProbability::from_counts(total, hits))
}

/// Parameters for the sliding-window signal detector.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlidingConfig {
    /// Width of the trailing window to inspect
    pub window: usize,
    /// Number of future steps evaluated after a signal
    pub horizon: usize,
    /// Minimum consecutive-LOW run inside the window required to signal
    pub min_k_lows: usize,
}

impl Default for SlidingConfig {
    fn default() -> Self {
        Self {
            window: 50,
            horizon: 5,
            min_k_lows: 8,
        }
    }
}

impl SlidingConfig {
    /// Validate all parameters are positive.
    pub fn validate(&self) -> AuditResult<()> {
        validate_positive(self.window, "window")?;
        validate_positive(self.horizon, "horizon")?;
        validate_positive(self.min_k_lows, "min_k_lows")
    }
}

/// Output of the sliding-window signal detector.
///
/// Positions are recorded, not just counts, so a caller can correlate
/// signals with wall-clock time afterwards. The record is ephemeral and
/// consumed by the caller that requested the scan.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlidingResult {
    /// Indices where the trailing window produced a signal
    pub positions: Vec<usize>,
    /// Per-signal outcome: did a HIGH occur within the horizon
    pub hits: Vec<bool>,
    /// Mean of the hit indicators; `None` with no signals
    pub empirical_prob: Option<f64>,
    /// Number of signals emitted
    pub total_signals: usize,
}

/// Scan every valid position t: if the trailing `window` categories contain a
/// consecutive LOW run of at least `min_k_lows`, emit a signal at t and
/// record whether a HIGH occurs in the next `horizon` categories.
pub fn sliding_signal_k_lows(
    cats: &[Category],
    config: &SlidingConfig,
) -> AuditResult<SlidingResult> {
    config.validate()?;
    let n = cats.len();
    let mut positions = Vec::new();
    let mut hits = Vec::new();

    if n >= config.window + config.horizon {
        let high: Vec<bool> = cats.iter().map(|&c| c == Category::High).collect();
        let next = next_high_index(&high);
        for t in config.window..=(n - config.horizon) {
            let win = &cats[t - config.window..t];
            let mut max_streak = 0usize;
            let mut cur = 0usize;
            for &c in win {
                if c == Category::Low {
                    cur += 1;
                    max_streak = max_streak.max(cur);
                } else {
                    cur = 0;
                }
            }
            if max_streak >= config.min_k_lows {
                positions.push(t);
                hits.push(next[t] < t + config.horizon);
            }
        }
    }

    let total_signals = positions.len();
    let empirical_prob = if total_signals > 0 {
        Some(hits.iter().filter(|&&h| h).count() as f64 / total_signals as f64)
    } else {
        None
    };
    Ok(SlidingResult {
        positions,
        hits,
        empirical_prob,
        total_signals,
    })
}

/// Binarize a series against a single cut: true when v >= cut ("high").
pub fn flags_high(data: &[f64], cut: f64) -> Vec<bool> {
    data.iter().map(|&v| v >= cut).collect()
}

/// Lengths of the maximal runs of `value` in a flag sequence.
pub fn run_lengths(flags: &[bool], value: bool) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut count = 0usize;
    for &f in flags {
        if f == value {
            count += 1;
        } else if count > 0 {
            lengths.push(count);
            count = 0;
        }
    }
    if count > 0 {
        lengths.push(count);
    }
    lengths
}

/// P(at least one high within the next h steps | k consecutive lows — or
/// highs, with `after_lows = false` — immediately before), over a binary
/// high/low flag sequence.
pub fn prob_high_within_h_after_k(
    flags: &[bool],
    k: usize,
    h: usize,
    after_lows: bool,
) -> AuditResult<PatternProbability> {
    validate_positive(k, "k")?;
    validate_positive(h, "h")?;
    let cond: Vec<bool> = flags.iter().map(|&f| f != after_lows).collect();
    Ok(conditional_scan(&cond, flags, k, h))
}

/// Conditional probabilities for one cut: horizon -> k -> probability.
///
/// Only entries whose trial count met the minimum-sample floor are present;
/// undersampled combinations are absent, never stored as zero.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutCurve {
    /// The cut threshold this curve belongs to
    pub cut: f64,
    /// Baseline frequency of highs at this cut
    pub baseline: f64,
    /// horizon -> k -> P(high within horizon | k consecutive lows)
    pub by_horizon: BTreeMap<usize, BTreeMap<usize, f64>>,
}

/// Conditional probability table over a family of cuts.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionalTable {
    /// One curve family per cut, in the order the cuts were given
    pub curves: Vec<CutCurve>,
}

/// Sweep cuts x horizons x k, classifying once per cut and reusing the
/// trailing-streak and next-high arrays across every (horizon, k)
/// combination. Entries with fewer than `min_count` qualifying instances
/// are omitted from the table.
pub fn sweep_conditional_table(
    data: &[f64],
    cuts: &[f64],
    horizons: &[usize],
    k_max: usize,
    min_count: usize,
) -> AuditResult<ConditionalTable> {
    validate_positive(k_max, "k_max")?;
    for &h in horizons {
        validate_positive(h, "horizon")?;
    }
    for &cut in cuts {
        if !cut.is_finite() {
            return Err(AuditError::InvalidParameter {
                parameter: "cut".to_string(),
                value: cut,
                constraint: "must be finite".to_string(),
            });
        }
    }

    let n = data.len();
    let mut curves = Vec::with_capacity(cuts.len());
    for &cut in cuts {
        let flags = flags_high(data, cut);
        let n_high = flags.iter().filter(|&&f| f).count();
        let baseline = if n > 0 { n_high as f64 / n as f64 } else { 0.0 };
        let cond: Vec<bool> = flags.iter().map(|&f| !f).collect();
        let streak = trailing_streaks(&cond);
        let next = next_high_index(&flags);

        let mut by_horizon = BTreeMap::new();
        for &h in horizons {
            // Bucket trials by capped streak length, then cumulate from
            // k_max down: one O(n + k_max) pass covers every k at once.
            let mut trials = vec![0usize; k_max + 1];
            let mut hits = vec![0usize; k_max + 1];
            if n >= h + 1 {
                for i in 1..=(n - h) {
                    let s = streak[i].min(k_max);
                    if s >= 1 {
                        trials[s] += 1;
                        if next[i] < i + h {
                            hits[s] += 1;
                        }
                    }
                }
            }
            let mut curve = BTreeMap::new();
            let mut total = 0usize;
            let mut hit = 0usize;
            for k in (1..=k_max).rev() {
                total += trials[k];
                hit += hits[k];
                if total >= min_count && total > 0 {
                    curve.insert(k, hit as f64 / total as f64);
                }
            }
            by_horizon.insert(h, curve);
        }
        debug!(
            "conditional sweep: cut={} baseline={:.4} horizons={}",
            cut,
            baseline,
            horizons.len()
        );
        curves.push(CutCurve {
            cut,
            baseline,
            by_horizon,
        });
    }
    Ok(ConditionalTable { curves })
}
