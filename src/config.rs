//! Audit configuration.
//!
//! One [`AuditConfig`] describes a full analysis run: which tests to compute
//! and every named parameter they take. Validation happens up front at the
//! analyzer boundary so parameter mistakes never surface from deep inside a
//! test.

use crate::categories::Thresholds;
use crate::dependence_tests::{BdsConfig, CutRule};
use crate::errors::{AuditError, AuditResult, validate_positive};
use crate::trend::SlidingConfig;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Analysis depth presets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AuditDepth {
    /// Distribution and dependence tests, no BDS, no trend engine
    Light,
    /// Distribution plus dependence tests (default)
    Standard,
    /// Everything including BDS and the conditional sweep
    Deep,
}

/// Configuration for a full audit run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuditConfig {
    /// Histogram bin count for the distribution summary and chi-square test
    pub bins: usize,
    /// Number of ACF lags to report
    pub acf_lags: usize,
    /// Number of Ljung-Box lags
    pub ljung_box_lags: usize,
    /// Cut rule for the runs test
    pub runs_cut: CutRule,
    /// BDS test parameters
    pub bds: BdsConfig,
    /// Category thresholds for the pattern engine
    pub thresholds: Thresholds,
    /// Sliding-window signal detector parameters
    pub sliding: SlidingConfig,
    /// Cut thresholds for the conditional sweep
    pub sweep_cuts: Vec<f64>,
    /// Horizons for the conditional sweep
    pub sweep_horizons: Vec<usize>,
    /// Maximum k for conditional curves
    pub k_max: usize,
    /// Minimum qualifying instances for a table entry
    pub min_count: usize,
    /// Target horizon for the per-cut trend statistics
    pub h_target: usize,
    /// Enable the BDS test
    pub enable_bds: bool,
    /// Enable the conditional pattern engine and sweep
    pub enable_trend: bool,
    /// Analysis depth preset the config was built from
    pub depth: AuditDepth,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl AuditConfig {
    fn base() -> Self {
        Self {
            bins: 30,
            acf_lags: 20,
            ljung_box_lags: 20,
            runs_cut: CutRule::Median,
            bds: BdsConfig::default(),
            // 2.0 / 10.0 are the conventional multiplier cuts
            thresholds: Thresholds::new(2.0, 10.0).expect("static thresholds are valid"),
            sliding: SlidingConfig::default(),
            sweep_cuts: vec![2.0, 5.0, 10.0, 20.0],
            sweep_horizons: vec![1, 2, 3, 4, 5],
            k_max: 30,
            min_count: 20,
            h_target: 5,
            enable_bds: true,
            enable_trend: true,
            depth: AuditDepth::Standard,
        }
    }

    /// Light preset: no BDS, no trend engine.
    pub fn light() -> Self {
        Self {
            enable_bds: false,
            enable_trend: false,
            depth: AuditDepth::Light,
            ..Self::base()
        }
    }

    /// Standard preset: distribution and dependence tests, trend engine on,
    /// BDS off (it is the expensive one).
    pub fn standard() -> Self {
        Self {
            enable_bds: false,
            depth: AuditDepth::Standard,
            ..Self::base()
        }
    }

    /// Deep preset: everything on.
    pub fn deep() -> Self {
        Self {
            depth: AuditDepth::Deep,
            ..Self::base()
        }
    }

    /// Validate every parameter; called once at the analyzer boundary.
    pub fn validate(&self) -> AuditResult<()> {
        validate_positive(self.bins, "bins")?;
        validate_positive(self.acf_lags, "acf_lags")?;
        validate_positive(self.ljung_box_lags, "ljung_box_lags")?;
        if self.enable_trend {
            self.sliding.validate()?;
            validate_positive(self.k_max, "k_max")?;
            validate_positive(self.h_target, "h_target")?;
            for &h in &self.sweep_horizons {
                validate_positive(h, "sweep_horizons")?;
            }
            for &cut in &self.sweep_cuts {
                if !cut.is_finite() {
                    return Err(AuditError::InvalidParameter {
                        parameter: "sweep_cuts".to_string(),
                        value: cut,
                        constraint: "must be finite".to_string(),
                    });
                }
            }
        }
        if let CutRule::Value(v) = self.runs_cut {
            if !v.is_finite() {
                return Err(AuditError::InvalidParameter {
                    parameter: "runs_cut".to_string(),
                    value: v,
                    constraint: "must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(AuditConfig::light().validate().is_ok());
        assert!(AuditConfig::standard().validate().is_ok());
        assert!(AuditConfig::deep().validate().is_ok());
        assert!(!AuditConfig::light().enable_trend);
        assert!(AuditConfig::deep().enable_bds);
        assert!(!AuditConfig::standard().enable_bds);
    }

    #[test]
    fn test_validation_catches_bad_parameters() {
        let mut config = AuditConfig::standard();
        config.bins = 0;
        assert!(config.validate().is_err());

        let mut config = AuditConfig::deep();
        config.sweep_horizons = vec![1, 0];
        assert!(config.validate().is_err());

        let mut config = AuditConfig::deep();
        config.runs_cut = CutRule::Value(f64::NAN);
        assert!(config.validate().is_err());
    }
}
