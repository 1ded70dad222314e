//! Random k-of-n sampling behind a trait, so board generation can be seeded in tests.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Uniform, unbiased sampling of distinct indices.
///
/// `sample_indices(n, k)` returns `k` distinct values from `0..n` in draw order
/// (not sorted). Every k-subset is equally likely. Callers guarantee `k <= n`.
pub trait Sampler: Send + Sync {
    fn sample_indices(&self, n: usize, k: usize) -> Vec<usize>;
}

/// Thread-local, OS-seeded generator. Not cryptographically meaningful here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn sample_indices(&self, n: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut rand::thread_rng(), n, k).into_vec()
    }
}

/// Deterministic sampler: same seed, same sequence of draws.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn sample_indices(&self, n: usize, k: usize) -> Vec<usize> {
        // RNG state survives a poisoned lock.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rand::seq::index::sample(&mut *rng, n, k).into_vec()
    }
}
