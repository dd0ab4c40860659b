//! # PoolOptions
//!
//! The `PoolOptions` struct holds the knobs of a search run: how many strains
//! evolve side by side, how many generations each strain runs per round, how
//! obedient the insertion heuristic is, and how often bookkeeping is verified.
//!
//! ## Example
//!
//! ```rust
//! use teampref::options::PoolOptions;
//!
//! let options = PoolOptions::builder()
//!     .strain_count(4)
//!     .generations_per_round(100)
//!     .seed(42)
//!     .build();
//!
//! assert_eq!(options.strain_count(), 4);
//! assert!(options.validate().is_ok());
//! assert_eq!(PoolOptions::default().generations_per_round(), 300);
//! ```

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolOptions {
    strain_count: usize,
    generations_per_round: usize,
    /// Obedience used when a strain is populated for the first time.
    initial_obedience: f64,
    /// Range the per-generation repair obedience is drawn from.
    repair_obedience: Range<f64>,
    /// Generations between consistency checks of a strain; 0 disables them.
    sanity_interval: u64,
    seed: Option<u64>,
}

impl PoolOptions {
    pub fn new(strain_count: usize, generations_per_round: usize) -> Self {
        Self {
            strain_count,
            generations_per_round,
            ..Self::default()
        }
    }

    pub fn strain_count(&self) -> usize {
        self.strain_count
    }

    pub fn generations_per_round(&self) -> usize {
        self.generations_per_round
    }

    pub fn initial_obedience(&self) -> f64 {
        self.initial_obedience
    }

    pub fn repair_obedience(&self) -> Range<f64> {
        self.repair_obedience.clone()
    }

    pub fn sanity_interval(&self) -> u64 {
        self.sanity_interval
    }

    /// Seed of the master generator; `None` seeds from system entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_strain_count(&mut self, strain_count: usize) {
        self.strain_count = strain_count;
    }

    pub fn set_generations_per_round(&mut self, generations: usize) {
        self.generations_per_round = generations;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Checks that the options describe a runnable search.
    ///
    /// # Errors
    ///
    /// Returns a [`RosterError::Configuration`] if the strain count or the
    /// generations per round is zero, or an obedience lies outside `(0, 100]`.
    pub fn validate(&self) -> Result<()> {
        if self.strain_count == 0 {
            return Err(RosterError::Configuration(
                "Strain count cannot be zero".to_string(),
            ));
        }
        if self.generations_per_round == 0 {
            return Err(RosterError::Configuration(
                "Generations per round cannot be zero".to_string(),
            ));
        }
        if !(self.initial_obedience > 0.0 && self.initial_obedience <= 100.0) {
            return Err(RosterError::Configuration(format!(
                "Initial obedience must be in (0, 100], got {}",
                self.initial_obedience
            )));
        }
        let Range { start, end } = self.repair_obedience;
        if !(start > 0.0 && start < end && end <= 100.0) {
            return Err(RosterError::Configuration(format!(
                "Repair obedience must be a non-empty range inside (0, 100], got {}..{}",
                start, end
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating a `PoolOptions` instance.
    pub fn builder() -> PoolOptionsBuilder {
        PoolOptionsBuilder::default()
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            strain_count: 8,
            generations_per_round: 300,
            initial_obedience: 99.0,
            repair_obedience: 80.0..100.0,
            sanity_interval: 1000,
            seed: None,
        }
    }
}

/// Builder for `PoolOptions`.
///
/// Unset fields fall back to [`PoolOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct PoolOptionsBuilder {
    strain_count: Option<usize>,
    generations_per_round: Option<usize>,
    initial_obedience: Option<f64>,
    repair_obedience: Option<Range<f64>>,
    sanity_interval: Option<u64>,
    seed: Option<u64>,
}

impl PoolOptionsBuilder {
    pub fn strain_count(mut self, value: usize) -> Self {
        self.strain_count = Some(value);
        self
    }

    pub fn generations_per_round(mut self, value: usize) -> Self {
        self.generations_per_round = Some(value);
        self
    }

    pub fn initial_obedience(mut self, value: f64) -> Self {
        self.initial_obedience = Some(value);
        self
    }

    pub fn repair_obedience(mut self, value: Range<f64>) -> Self {
        self.repair_obedience = Some(value);
        self
    }

    pub fn sanity_interval(mut self, value: u64) -> Self {
        self.sanity_interval = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `PoolOptions` instance. Call [`PoolOptions::validate`] (or
    /// hand it to a pool, which does) to check it.
    pub fn build(self) -> PoolOptions {
        let defaults = PoolOptions::default();
        PoolOptions {
            strain_count: self.strain_count.unwrap_or(defaults.strain_count),
            generations_per_round: self
                .generations_per_round
                .unwrap_or(defaults.generations_per_round),
            initial_obedience: self.initial_obedience.unwrap_or(defaults.initial_obedience),
            repair_obedience: self.repair_obedience.unwrap_or(defaults.repair_obedience),
            sanity_interval: self.sanity_interval.unwrap_or(defaults.sanity_interval),
            seed: self.seed.or(defaults.seed),
        }
    }
}
