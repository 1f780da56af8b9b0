//! Random draws used for jitter in valuations
//!
//! Every random field of a valuation comes from a [`RandomSource`], so a
//! seeded or mocked source makes the whole result reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of uniform draws in `[0, 1)`
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send {
    /// Next uniform draw in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

/// Draws from the thread-local generator; not reproducible
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

/// Seeded generator; identical seeds give identical draw sequences
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Uniform value in `[low, high)`
pub fn uniform(source: &mut dyn RandomSource, low: f64, high: f64) -> f64 {
    low + source.next_f64() * (high - low)
}

/// Uniform index in `[0, len)`. `len` must be non-zero.
pub fn index(source: &mut dyn RandomSource, len: usize) -> usize {
    // next_f64 < 1, but a misbehaving source must not index out of bounds
    ((source.next_f64() * len as f64) as usize).min(len - 1)
}

/// Pick `count` distinct items from `pool` via a partial Fisher-Yates shuffle
pub fn sample<T: Clone>(source: &mut dyn RandomSource, pool: &[T], count: usize) -> Vec<T> {
    let mut items = pool.to_vec();
    let count = count.min(items.len());
    for i in 0..count {
        let j = i + index(source, items.len() - i);
        items.swap(i, j);
    }
    items.truncate(count);
    items
}

/// Random lowercase base36 string of the given length
pub fn base36(source: &mut dyn RandomSource, len: usize) -> String {
    (0..len)
        .map(|_| char::from(BASE36[index(source, BASE36.len())]))
        .collect()
}
