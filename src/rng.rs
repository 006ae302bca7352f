//! Deterministic random number generation for sampled estimators.
//!
//! The BDS pair sampler is the only consumer of randomness in the crate.
//! Each call constructs its own locally-owned generator from an explicit
//! seed, so the same seed always reproduces the same result and concurrent
//! analyses never share state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Locally-owned seeded RNG.
///
/// Thin wrapper over ChaCha20 keeping the seed explicit in the API. There is
/// deliberately no global or thread-local instance.
#[derive(Clone)]
pub struct AuditRng {
    rng: ChaCha20Rng,
}

impl std::fmt::Debug for AuditRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRng").finish_non_exhaustive()
    }
}

impl AuditRng {
    /// Create an RNG from an explicit seed.
    ///
    /// `seed_from_u64` expands the u64 into a full 256-bit ChaCha seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random f64 in [0, 1).
    pub fn f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Generate a random usize in the half-open range (no modulo bias).
    pub fn usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = AuditRng::with_seed(123);
        let mut b = AuditRng::with_seed(123);
        for _ in 0..100 {
            assert_eq!(a.f64(), b.f64());
        }
        let mut c = AuditRng::with_seed(124);
        let same: Vec<f64> = (0..10).map(|_| AuditRng::with_seed(123).f64()).collect();
        assert!(same.iter().all(|&v| v == same[0]));
        assert_ne!(AuditRng::with_seed(123).f64(), c.f64());
    }

    #[test]
    fn test_ranges() {
        let mut rng = AuditRng::with_seed(7);
        for _ in 0..1000 {
            let v = rng.f64();
            assert!((0.0..1.0).contains(&v));
            let u = rng.usize(10..20);
            assert!((10..20).contains(&u));
        }
    }
}
