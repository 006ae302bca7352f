//! Shared numeric helpers for the statistical tests.
//!
//! Everything here is a pure function of its input slice. Moment helpers come
//! in biased (population) and bias-corrected flavors because different tests
//! want different conventions: Jarque-Bera uses the biased moments, the
//! distribution summary the corrected ones.

use crate::errors::{AuditError, AuditResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Total ordering comparison for f64 values (NaN sorts last).
pub fn float_total_cmp(a: &f64, b: &f64) -> std::cmp::Ordering {
    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Median via sorting a copy. Returns NaN for an empty slice.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(float_total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Population variance (n denominator) using Welford's single-pass update.
///
/// Single-pass accumulation keeps the computation stable when values sit far
/// from zero, which multiplier feeds routinely do.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in data.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }
    (m2 / data.len() as f64).max(0.0)
}

/// Population standard deviation (n denominator).
pub fn population_std(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Central moments 2..4 about the mean, each divided by n.
///
/// Returns `(m2, m3, m4)`; all NaN for an empty slice.
pub fn central_moments(data: &[f64]) -> (f64, f64, f64) {
    let n = data.len();
    if n == 0 {
        return (f64::NAN, f64::NAN, f64::NAN);
    }
    let mu = mean(data);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in data {
        let d = x - mu;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    let nf = n as f64;
    (m2 / nf, m3 / nf, m4 / nf)
}

/// Biased sample skewness g1 = m3 / m2^(3/2).
///
/// `None` when fewer than 2 points or zero variance.
pub fn skewness_biased(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let (m2, m3, _) = central_moments(data);
    if m2 <= 0.0 {
        return None;
    }
    Some(m3 / m2.powf(1.5))
}

/// Bias-corrected sample skewness G1 = g1 * sqrt(n(n-1)) / (n-2).
///
/// `None` when fewer than 3 points or zero variance.
pub fn skewness_corrected(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let g1 = skewness_biased(data)?;
    let nf = n as f64;
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Biased, non-excess sample kurtosis b2 = m4 / m2^2 (normal = 3).
///
/// `None` when fewer than 2 points or zero variance.
pub fn kurtosis_biased(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let (m2, _, m4) = central_moments(data);
    if m2 <= 0.0 {
        return None;
    }
    Some(m4 / (m2 * m2))
}

/// Bias-corrected excess kurtosis, Fisher convention (normal = 0).
///
/// G2 = ((n+1)(b2 - 3) + 6) * (n-1) / ((n-2)(n-3)).
/// `None` when fewer than 4 points or zero variance.
pub fn kurtosis_excess_corrected(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 4 {
        return None;
    }
    let b2 = kurtosis_biased(data)?;
    let nf = n as f64;
    Some(((nf + 1.0) * (b2 - 3.0) + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0)))
}

/// Equal-width histogram over the observed range `[min, max]`.
///
/// The last bin is closed on the right so the maximum lands in it.
/// A constant series puts everything in the first bin. Returns bin counts;
/// empty input yields all-zero counts.
pub fn histogram_counts(data: &[f64], bins: usize) -> Vec<u64> {
    let mut counts = vec![0u64; bins];
    if data.is_empty() || bins == 0 {
        return counts;
    }
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = max - min;
    if width <= 0.0 {
        counts[0] = data.len() as u64;
        return counts;
    }
    for &x in data {
        let mut idx = (((x - min) / width) * bins as f64) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }
    counts
}

/// Shannon entropy in bits of a histogram, treating empty bins as 0.
///
/// `None` when the histogram holds no observations; exactly 0 when all mass
/// sits in one bin.
pub fn histogram_entropy_bits(counts: &[u64]) -> Option<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return None;
    }
    let total = total as f64;
    let mut h = 0.0;
    for &c in counts {
        if c > 0 {
            let p = c as f64 / total;
            h -= p * p.log2();
        }
    }
    // -0.0 shows up for single-bin histograms
    Some(h.max(0.0))
}

/// Biased sample autocorrelations for lags 1..=max_lag.
///
/// Numerator is the mean lagged cross-product of the centered series divided
/// by n; denominator is the biased sample variance. This is the classical
/// estimator whose sum the Ljung-Box statistic is built from.
///
/// Returns an empty vector when the series is empty or has zero variance.
pub fn sample_autocorrelations(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    if n == 0 || max_lag == 0 {
        return Vec::new();
    }
    let mu = mean(data);
    let centered: Vec<f64> = data.iter().map(|x| x - mu).collect();
    let var = centered.iter().map(|d| d * d).sum::<f64>() / n as f64;
    if var <= 0.0 {
        return Vec::new();
    }
    let mut rhos = Vec::with_capacity(max_lag);
    for k in 1..=max_lag {
        if k >= n {
            rhos.push(0.0);
            continue;
        }
        let num = centered[..n - k]
            .iter()
            .zip(&centered[k..])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n as f64;
        rhos.push(num / var);
    }
    rhos
}

/// Upper tail of the chi-squared distribution: P(X > x) with `df` degrees of freedom.
pub fn chi_squared_sf(x: f64, df: f64) -> AuditResult<f64> {
    let chi_sq = ChiSquared::new(df).map_err(|_| AuditError::NumericalError {
        reason: format!(
            "Failed to create chi-squared distribution with {} degrees of freedom",
            df
        ),
    })?;
    Ok(1.0 - chi_sq.cdf(x.max(0.0)))
}

/// Standard normal CDF via the error function.
pub fn standard_normal_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Error function approximation, Abramowitz & Stegun formula 7.1.26.
///
/// Maximum absolute error below 1.5e-7 for all real x, which is ample for
/// two-sided normal p-values.
pub fn erf(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if x.abs() > 6.0 {
        return if x > 0.0 { 1.0 } else { -1.0 };
    }

    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Two-sided normal p-value for a z statistic.
pub fn two_sided_normal_p(z: f64) -> f64 {
    2.0 * (1.0 - standard_normal_cdf(z.abs()))
}

/// Safe arithmetic operations that surface degenerate denominators as `None`.
pub mod float_ops {
    /// Division returning `None` on zero or non-finite denominator.
    pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
        if denominator == 0.0 || !denominator.is_finite() {
            None
        } else {
            Some(numerator / denominator)
        }
    }

    /// Square root returning `None` for negative or non-finite input.
    pub fn safe_sqrt(x: f64) -> Option<f64> {
        if x.is_finite() && x >= 0.0 {
            Some(x.sqrt())
        } else {
            None
        }
    }

    /// Approximate equality with an explicit epsilon.
    pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }
}
