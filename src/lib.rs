//! # Random Audit
//!
//! Statistical randomness and short-range dependence auditing for ordered
//! series of repeated-round outcomes (e.g. multiplier values).
//!
//! Given a cleaned numeric sequence, the crate answers one question: is the
//! sequence plausibly i.i.d., or does it show departures — autocorrelation,
//! non-linear dependence, runs structure, non-normal higher moments — that
//! could be exploited for prediction?
//!
//! ## Components
//!
//! - **Distribution tests**: moment/entropy summary, chi-square uniform
//!   binning, Kolmogorov-Smirnov against a scaled uniform, Jarque-Bera.
//! - **Dependence tests**: Wald-Wolfowitz runs, runs-up-and-down, sample
//!   ACF, Ljung-Box, and a sampled-pair BDS test with a deterministic seed.
//! - **Pattern engine**: LOW/MID/HIGH classification, conditional
//!   probabilities of a HIGH outcome within a horizon after run or pattern
//!   structure, a sliding-window signal detector, and per-cut curve
//!   statistics for ranking thresholds.
//!
//! Every test returns a typed result record where "undefined" is an
//! `Option` field: insufficient or degenerate data never produces a
//! spurious zero or a silent NaN, and never an exception-style failure.
//! Only malformed parameters are errors, raised at the call boundary.
//!
//! ## Quick start
//!
//! ```rust
//! use random_audit::{run_audit, AuditConfig};
//!
//! let series: Vec<f64> = (0..500)
//!     .map(|i| 1.0 + ((i * 37 + 11) % 97) as f64 / 10.0)
//!     .collect();
//! let report = run_audit(&series, &AuditConfig::standard())?;
//!
//! if let Some(p) = report.ljung_box.p_value {
//!     println!("Ljung-Box p = {:.4}", p);
//! }
//! for row in report.trend_stats.as_deref().unwrap_or_default() {
//!     println!("cut {}: range {:?}", row.cut, row.range);
//! }
//! # Ok::<(), random_audit::AuditError>(())
//! ```
//!
//! All computation is single-threaded, synchronous and deterministic; the
//! only randomness is the BDS pair sampler, which is seeded per call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod categories;
pub mod config;
pub mod errors;
pub mod math_utils;
pub mod preprocessing;
pub mod rng;
pub mod trend;
pub mod trend_stats;

pub use analyzer::{run_audit, AuditReport};
pub use categories::{class_frequencies, classify, Category, ClassFrequencies, Thresholds};
pub use config::{AuditConfig, AuditDepth};
pub use dependence_tests::{
    acf, bds_test, ljung_box, runs_test, runs_up_down, Acf, BdsConfig, BdsTest, CutRule,
    LjungBox, RunsTest, RunsUpDown,
};
pub use distribution_tests::{
    chi_square_uniform, dist_summary, jarque_bera, ks_scaled_uniform, ChiSquareUniform,
    DistSummary, JarqueBera, KsTest,
};
pub use errors::{AuditError, AuditResult};
pub use preprocessing::{basic_metrics, clean_series, parse_series, SeriesSummary};
pub use trend::{
    flags_high, p_high_after_k_lows, p_high_after_pattern, p_high_after_run,
    prob_high_within_h_after_k, run_lengths, sliding_signal_k_lows, sweep_conditional_table,
    ConditionalTable, CutCurve, PatternProbability, SlidingConfig, SlidingResult,
};
pub use trend_stats::{stats_table_for_cuts, summarize_prob_curve, TrendStats};
