//! RNG service owned by the driver and threaded through operator calls.
//!
//! The source this engine is derived from used a process-wide RNG shared
//! by every operator. Re-architected per the redesign notes: a single
//! `Rng64` lives on the driver and is passed to operators by `&mut`
//! reference, which makes runs reproducible under a seed and removes
//! hidden shared state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Uniform-real, uniform-integer and normal-distribution draws, seedable.
pub struct Rng64 {
    inner: StdRng,
}

impl Rng64 {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Draw from `[0, 1)`.
    pub fn uniform01(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Draw from `[lb, ub)`.
    pub fn uniform_range(&mut self, lb: f64, ub: f64) -> f64 {
        self.inner.random_range(lb..ub)
    }

    /// Draw an index in `[0, n)`.
    pub fn uniform_index(&mut self, n: usize) -> usize {
        self.inner.random_range(0..n)
    }

    /// Draw from `Normal(mu, sigma)`. Falls back to `mu` if `sigma <= 0`.
    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        if sigma <= 0.0 {
            return mu;
        }
        Normal::new(mu, sigma).unwrap().sample(&mut self.inner)
    }

    /// Resample `Normal(mu, sigma)` until the draw falls in `[lb, ub]`.
    pub fn truncated_normal(&mut self, mu: f64, sigma: f64, lb: f64, ub: f64) -> f64 {
        loop {
            let v = self.normal(mu, sigma);
            if v >= lb && v <= ub {
                return v;
            }
        }
    }

    /// `count` distinct indices in `[0, pool_size)`, excluding `exclude`.
    pub fn distinct_indices(&mut self, exclude: &[usize], count: usize, pool_size: usize) -> Vec<usize> {
        debug_assert!(pool_size >= count + exclude.len());
        let mut idxs: Vec<usize> = (0..pool_size).filter(|i| !exclude.contains(i)).collect();
        // Fisher-Yates partial shuffle: only need the first `count` entries.
        for i in 0..count {
            let j = i + self.uniform_index(idxs.len() - i);
            idxs.swap(i, j);
        }
        idxs.truncate(count);
        idxs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = Rng64::seeded(42);
        let mut b = Rng64::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.uniform01(), b.uniform01());
        }
    }

    #[test]
    fn distinct_indices_excludes_and_has_no_duplicates() {
        let mut rng = Rng64::seeded(7);
        for _ in 0..20 {
            let idxs = rng.distinct_indices(&[3], 4, 10);
            assert_eq!(idxs.len(), 4);
            assert!(!idxs.contains(&3));
            let mut sorted = idxs.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), idxs.len());
        }
    }

    #[test]
    fn truncated_normal_stays_in_bounds() {
        let mut rng = Rng64::seeded(1);
        for _ in 0..200 {
            let v = rng.truncated_normal(0.5, 2.0, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
