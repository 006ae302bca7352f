//! Audit orchestration.
//!
//! [`run_audit`] takes one raw series and one configuration, coerces the
//! input once, and computes every enabled test independently: an undefined
//! result in one test never blocks or corrupts another. The categorical
//! classification is computed once per threshold pair and reused by every
//! pattern query, and the conditional sweep reuses its per-cut arrays across
//! all (horizon, k) combinations.

use crate::categories::{class_frequencies, classify, ClassFrequencies};
use crate::config::AuditConfig;
use crate::dependence_tests::{
    acf, bds_test, ljung_box, runs_test, runs_up_down, Acf, BdsTest, LjungBox, RunsTest,
    RunsUpDown,
};
use crate::distribution_tests::{
    chi_square_uniform, dist_summary, jarque_bera, ks_scaled_uniform, ChiSquareUniform,
    DistSummary, JarqueBera, KsTest,
};
use crate::errors::AuditResult;
use crate::preprocessing::{basic_metrics, clean_series, SeriesSummary};
use crate::trend::{sliding_signal_k_lows, sweep_conditional_table, ConditionalTable, SlidingResult};
use crate::trend_stats::{stats_table_for_cuts, TrendStats};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete results of one audit run.
///
/// Plain structured value; every field is independently serializable for
/// whatever reporting format the caller uses.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuditReport {
    /// Basic summary metrics of the cleaned series
    pub summary: SeriesSummary,
    /// Moment and entropy summary
    pub dist_summary: DistSummary,
    /// Chi-square uniform-binning test
    pub chi_square: ChiSquareUniform,
    /// KS against scaled uniform (note carries the self-scaling caveat)
    pub ks: KsTest,
    /// Jarque-Bera normality test
    pub jarque_bera: JarqueBera,
    /// Wald-Wolfowitz runs test
    pub runs: RunsTest,
    /// Runs-up-and-down test
    pub runs_up_down: RunsUpDown,
    /// Sample autocorrelation function
    pub acf: Acf,
    /// Ljung-Box joint autocorrelation test
    pub ljung_box: LjungBox,
    /// BDS test, present when enabled
    pub bds: Option<BdsTest>,
    /// Category frequencies under the configured thresholds
    pub class_frequencies: Option<ClassFrequencies>,
    /// Sliding-window signal detector output, present when trend is enabled
    pub sliding: Option<SlidingResult>,
    /// Conditional probability table over the sweep cuts
    pub conditional_table: Option<ConditionalTable>,
    /// Per-cut curve statistics at the target horizon
    pub trend_stats: Option<Vec<TrendStats>>,
}

/// Run a full audit of a raw series.
///
/// The input is coerced once (non-finite entries dropped); parameter errors
/// from the configuration surface here, before any test runs. Insufficient
/// or degenerate data shows up as `None` fields inside individual results.
pub fn run_audit(raw: &[f64], config: &AuditConfig) -> AuditResult<AuditReport> {
    config.validate()?;
    let series = clean_series(raw);
    debug!(
        "audit: {} raw values, {} after coercion",
        raw.len(),
        series.len()
    );

    let summary = basic_metrics(&series);
    let dist = dist_summary(&series, config.bins)?;
    let chi_square = chi_square_uniform(&series, config.bins)?;
    let ks = ks_scaled_uniform(&series);
    let jb = jarque_bera(&series)?;
    let runs = runs_test(&series, config.runs_cut);
    let up_down = runs_up_down(&series);
    let acf_result = acf(&series, config.acf_lags)?;
    let lb = ljung_box(&series, config.ljung_box_lags)?;

    let bds = if config.enable_bds {
        Some(bds_test(&series, &config.bds)?)
    } else {
        None
    };

    let (freqs, sliding, table, trend_rows) = if config.enable_trend {
        // Classify once per threshold pair; every pattern query reuses it
        let cats = classify(&series, &config.thresholds);
        let freqs = class_frequencies(&cats);
        let sliding = sliding_signal_k_lows(&cats, &config.sliding)?;
        let table = sweep_conditional_table(
            &series,
            &config.sweep_cuts,
            &config.sweep_horizons,
            config.k_max,
            config.min_count,
        )?;
        let rows = stats_table_for_cuts(&table, config.h_target);
        (freqs, Some(sliding), Some(table), Some(rows))
    } else {
        (None, None, None, None)
    };

    Ok(AuditReport {
        summary,
        dist_summary: dist,
        chi_square,
        ks,
        jarque_bera: jb,
        runs,
        runs_up_down: up_down,
        acf: acf_result,
        ljung_box: lb,
        bds,
        class_frequencies: freqs,
        sliding,
        conditional_table: table,
        trend_stats: trend_rows,
    })
}
