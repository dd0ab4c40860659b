//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` with the
//! handful of draws the search needs: percentage coin flips, uniform ranges and
//! in-place shuffles.
//!
//! Every strain owns its own generator, forked from one master generator when
//! the pool is created. A seeded master therefore reproduces a whole run no
//! matter how the worker threads are scheduled.
//!
//! ## Example
//!
//! ```rust
//! use teampref::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let mut order = vec![1, 2, 3, 4];
//! rng.shuffle(&mut order);
//! assert_eq!(order.len(), 4);
//! assert!(rng.chance(100.0));
//! assert!(!rng.chance(0.0));
//! ```

use std::ops::Range;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A seedable random number generator owned by one strain.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator from this one.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen())
    }

    /// Returns true with probability `percent / 100`.
    pub fn chance(&mut self, percent: f64) -> bool {
        self.rng.gen::<f64>() < percent / 100.0
    }

    /// Draws a percentage uniformly from `range` (start inclusive, end exclusive).
    pub fn percent_in(&mut self, range: Range<f64>) -> f64 {
        self.rng.gen_range(range)
    }

    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Shuffles the slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
