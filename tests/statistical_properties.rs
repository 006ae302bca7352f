//! Statistical property tests for the distribution and dependence tests.
//!
//! Properties that must hold for any input of a given shape, plus
//! null-behavior checks on synthetic data with fixed seeds.

use assert_approx_eq::assert_approx_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};
use random_audit::*;

fn uniform_series(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

fn normal_series(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..n).map(|_| StandardNormal.sample(&mut rng)).collect()
}

#[test]
fn runs_test_median_cut_class_sizes() {
    // All-distinct values, cut at the median: above + below is n or n-1
    // depending on whether the exact median was excluded
    for seed in [1u64, 2, 3, 4, 5] {
        for n in [2usize, 3, 10, 51, 200] {
            let data = uniform_series(seed, n);
            let result = runs_test(&data, CutRule::Median);
            let classified = result.n_above + result.n_below;
            assert!(
                classified == n || classified == n - 1,
                "n = {}, classified = {}",
                n,
                classified
            );
            assert!(result.runs.unwrap() >= 1);
        }
    }
}

#[test]
fn entropy_constant_series_is_zero() {
    for n in [1usize, 5, 100, 10_000] {
        let summary = dist_summary(&vec![3.3; n], 30).unwrap();
        assert_eq!(summary.entropy_bits, Some(0.0), "n = {}", n);
    }
}

#[test]
fn entropy_uniform_spread_approaches_log2_bins() {
    let bins = 16usize;
    let data: Vec<f64> = (0..16_000).map(|i| i as f64).collect();
    let summary = dist_summary(&data, bins).unwrap();
    let entropy = summary.entropy_bits.unwrap();
    assert_approx_eq!(entropy, (bins as f64).log2(), 0.01);
}

#[test]
fn chi_square_zero_iff_balanced() {
    // Synthetic balanced series: one value centered in each quarter
    let data = vec![0.125, 0.375, 0.625, 0.875, 0.1, 0.35, 0.6, 0.9];
    let result = chi_square_uniform(&data, 4).unwrap();
    assert_approx_eq!(result.statistic.unwrap(), 0.0);

    // Any imbalance makes it strictly positive
    let data = vec![0.1, 0.1, 0.1, 0.9];
    let result = chi_square_uniform(&data, 4).unwrap();
    assert!(result.statistic.unwrap() > 0.0);
}

#[test]
fn acf_lag1_matches_manual_computation() {
    let data = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
    let result = acf(&data, 1).unwrap();

    // Manual biased lag-1 estimate
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();
    let var = centered.iter().map(|d| d * d).sum::<f64>() / n;
    let num = centered[..7]
        .iter()
        .zip(&centered[1..])
        .map(|(a, b)| a * b)
        .sum::<f64>()
        / n;
    assert_approx_eq!(result.acf[0], num / var, 1e-12);
    // Alternating series: strong negative lag-1 autocorrelation near -1
    assert!(result.acf[0] < -0.8);
}

#[test]
fn ljung_box_white_noise_mostly_insignificant() {
    // For i.i.d. normal data the null holds; the p-value should clear 0.05
    // in the large majority of seeds
    let mut passes = 0;
    let seeds: Vec<u64> = (100..108).collect();
    for &seed in &seeds {
        let data = normal_series(seed, 500);
        let result = ljung_box(&data, 24).unwrap();
        assert!(result.q.unwrap() >= 0.0);
        if result.p_value.unwrap() > 0.05 {
            passes += 1;
        }
    }
    assert!(
        passes >= seeds.len() - 2,
        "only {}/{} white-noise series passed",
        passes,
        seeds.len()
    );
}

#[test]
fn ljung_box_detects_strong_dependence() {
    // AR(1) with phi = 0.8: Q must explode
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut data = vec![0.0f64; 500];
    for i in 1..500 {
        let e: f64 = StandardNormal.sample(&mut rng);
        data[i] = 0.8 * data[i - 1] + e;
    }
    let result = ljung_box(&data, 24).unwrap();
    assert!(result.p_value.unwrap() < 1e-6);
}

#[test]
fn jarque_bera_normal_data_usually_accepted() {
    let mut passes = 0;
    for seed in 200..208u64 {
        let data = normal_series(seed, 500);
        let result = jarque_bera(&data).unwrap();
        if result.p_value.unwrap() > 0.05 {
            passes += 1;
        }
    }
    assert!(passes >= 6, "only {}/8 normal series accepted", passes);
}

#[test]
fn jarque_bera_rejects_heavy_tails() {
    // Exponentiated normal data is strongly skewed
    let data: Vec<f64> = normal_series(7, 500).iter().map(|x| x.exp()).collect();
    let result = jarque_bera(&data).unwrap();
    assert!(result.p_value.unwrap() < 0.001);
    assert!(result.skewness.unwrap() > 1.0);
}

#[test]
fn ks_uniform_data_accepted() {
    let data = uniform_series(11, 1000);
    let result = ks_scaled_uniform(&data);
    assert!(result.p_value.unwrap() > 0.01);
}

#[test]
fn bds_iid_data_modest_statistic() {
    // Under independence Cm ~ C1^m; the z statistic stays small
    let data = uniform_series(31, 500);
    let result = bds_test(&data, &BdsConfig::default()).unwrap();
    let z = result.z.unwrap();
    assert!(z.abs() < 3.0, "z = {}", z);
}

#[test]
fn bds_same_seed_reproduces_exactly() {
    let data = uniform_series(77, 300);
    let config = BdsConfig {
        seed: 9001,
        ..BdsConfig::default()
    };
    let a = bds_test(&data, &config).unwrap();
    let b = bds_test(&data, &config).unwrap();
    assert_eq!(a.z, b.z);
    assert_eq!(a.p_value, b.p_value);

    let other = BdsConfig {
        seed: 9002,
        ..BdsConfig::default()
    };
    let c = bds_test(&data, &other).unwrap();
    assert_ne!(a.c1, c.c1);
}

#[test]
fn probabilities_always_in_unit_interval_or_undefined() {
    for seed in [3u64, 13, 23] {
        let data = uniform_series(seed, 400);
        let report = run_audit(&data, &AuditConfig::deep()).unwrap();
        for p in [
            report.chi_square.p_value,
            report.ks.p_value,
            report.jarque_bera.p_value,
            report.runs.p_value,
            report.runs_up_down.p_value,
            report.ljung_box.p_value,
            report.bds.as_ref().and_then(|b| b.p_value),
        ]
        .into_iter()
        .flatten()
        {
            assert!((0.0..=1.0).contains(&p), "p = {}", p);
        }
    }
}
