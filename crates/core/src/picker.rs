//! Random index selection for `get_random` queries

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Chooses an index in `[0, bound)`. Callers never pass `bound == 0`.
pub trait IndexPicker: Send + Sync {
    fn pick(&self, bound: usize) -> usize;
}

/// Uniform choice from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl IndexPicker for ThreadRngPicker {
    fn pick(&self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

/// Uniform choice from a seeded generator, reproducible across runs
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IndexPicker for SeededPicker {
    fn pick(&self, bound: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0..bound)
    }
}

/// Adapts a plain function, e.g. `FnPicker(|_| 0)` to always pick the first record
pub struct FnPicker<F>(pub F);

impl<F> IndexPicker for FnPicker<F>
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn pick(&self, bound: usize) -> usize {
        (self.0)(bound)
    }
}
