//! # StrainPool
//!
//! Runs several [`Strain`]s side by side. Work happens in rounds: every strain
//! evolves a fixed number of generations on its own copy of the state, in
//! parallel when there is more than one, and the pool adopts the results only
//! if every strain finished. A round cut short by a [`StopToken`] is thrown
//! away whole, so the pool always holds the outcome of the last complete
//! round.
//!
//! ## Example
//!
//! ```rust
//! use teampref::options::PoolOptions;
//! use teampref::pain::{PainIndex, PainModel};
//! use teampref::pool::StrainPool;
//! use teampref::roster::{PersonSpec, RosterBuilder, TeamSpec};
//! use teampref::stop::StopToken;
//!
//! let base = RosterBuilder::new()
//!     .team(TeamSpec::new("a", 1))
//!     .team(TeamSpec::new("b", 1))
//!     .person(PersonSpec::new("x").prefers(["b"]))
//!     .person(PersonSpec::new("y").prefers(["a"]))
//!     .build()
//!     .unwrap();
//! let options = PoolOptions::builder()
//!     .strain_count(2)
//!     .generations_per_round(50)
//!     .seed(1)
//!     .build();
//!
//! let mut pool = StrainPool::new(&base, PainModel::default(), options).unwrap();
//! pool.run_rounds(2, &StopToken::new()).unwrap();
//! assert_eq!(pool.best().pain(), PainIndex::new(0, 2, 0.0));
//! ```

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::group::TeamGroup;
use crate::options::PoolOptions;
use crate::pain::{PainIndex, PainModel};
use crate::rng::RandomNumberGenerator;
use crate::search::{EvolveOutcome, LocalSearchEngine, Strain};
use crate::stop::StopToken;

/// Whether a round's results were adopted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Completed,
    /// A stop was requested; the pool is unchanged.
    Cancelled,
}

/// Snapshot handed to the caller after every completed round.
#[derive(Debug, Clone)]
pub struct RoundReport<'a> {
    /// Number of completed rounds, starting at 1.
    pub round: u64,
    /// Id of the strain holding the best group.
    pub best_strain: usize,
    pub pain: PainIndex,
    /// Pain index of every strain, by strain id.
    pub strain_pains: Vec<PainIndex>,
    pub best: &'a TeamGroup,
}

/// A set of independently evolving strains sharing one roster.
#[derive(Debug)]
pub struct StrainPool {
    engine: LocalSearchEngine,
    options: PoolOptions,
    strains: Vec<Strain>,
    rounds: u64,
}

impl StrainPool {
    /// Creates the pool and populates every strain from `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - The starting group. Pinned people keep their seats in every
    ///   strain; everyone else is released and placed again.
    /// * `model` - The pain model to minimize.
    /// * `options` - Strain count, round length, obedience and seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or `base` fails its
    /// consistency check.
    pub fn new(base: &TeamGroup, model: PainModel, options: PoolOptions) -> Result<Self> {
        options.validate()?;
        base.sanity_check()?;

        let mut master = match options.seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        let engine = LocalSearchEngine::new(model, &options);
        let strains: Vec<Strain> = (0..options.strain_count())
            .map(|id| engine.spawn(id, base, master.fork()))
            .collect();

        let pool = Self {
            engine,
            options,
            strains,
            rounds: 0,
        };
        for strain in &pool.strains {
            let unplaced = strain.group().unassigned().len();
            if unplaced > 0 {
                warn!(strain = strain.id(), unplaced, "not everyone fits on a team");
            }
        }
        info!(
            strains = pool.strains.len(),
            people = base.roster().population(),
            seats = base.roster().total_capacity(),
            teams = base.teams().len(),
            pain = %pool.best().pain(),
            "strain pool ready"
        );
        Ok(pool)
    }

    /// The options the pool was created with.
    pub fn options(&self) -> &PoolOptions {
        &self.options
    }

    pub fn strains(&self) -> &[Strain] {
        &self.strains
    }

    /// Completed rounds so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// The strain with the lowest pain index. Ties go to the lowest id.
    pub fn best(&self) -> &Strain {
        self.strains
            .iter()
            .skip(1)
            .fold(&self.strains[0], |best, strain| {
                if strain.pain() < best.pain() {
                    strain
                } else {
                    best
                }
            })
    }

    /// Evolves every strain for one round.
    ///
    /// # Returns
    ///
    /// [`RoundOutcome::Cancelled`] without touching the pool if `stop` was
    /// set before or during the round.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any strain.
    pub fn run_round(&mut self, stop: &StopToken) -> Result<RoundOutcome> {
        if stop.is_set() {
            return Ok(RoundOutcome::Cancelled);
        }

        let engine = &self.engine;
        let generations = self.options.generations_per_round();
        let evolve = |strain: &Strain| -> Result<(Strain, EvolveOutcome)> {
            let mut strain = strain.clone();
            let outcome = engine.evolve(&mut strain, generations, stop)?;
            Ok((strain, outcome))
        };

        let results: Vec<(Strain, EvolveOutcome)> = if self.strains.len() > 1 {
            self.strains.par_iter().map(evolve).collect::<Result<_>>()?
        } else {
            self.strains.iter().map(evolve).collect::<Result<_>>()?
        };

        if results
            .iter()
            .any(|(_, outcome)| *outcome == EvolveOutcome::Interrupted)
        {
            info!(round = self.rounds + 1, "round interrupted, keeping previous results");
            return Ok(RoundOutcome::Cancelled);
        }

        self.strains = results.into_iter().map(|(strain, _)| strain).collect();
        self.rounds += 1;
        debug!(round = self.rounds, pain = %self.best().pain(), "round complete");
        Ok(RoundOutcome::Completed)
    }

    /// Summary of the pool after the last completed round.
    pub fn report(&self) -> RoundReport<'_> {
        let best = self.best();
        RoundReport {
            round: self.rounds,
            best_strain: best.id(),
            pain: best.pain(),
            strain_pains: self.strains.iter().map(Strain::pain).collect(),
            best: best.group(),
        }
    }

    /// Runs at most `rounds` rounds, stopping early if `stop` is set.
    /// Returns how many rounds completed.
    pub fn run_rounds(&mut self, rounds: u64, stop: &StopToken) -> Result<u64> {
        let mut completed = 0;
        while completed < rounds {
            match self.run_round(stop)? {
                RoundOutcome::Completed => completed += 1,
                RoundOutcome::Cancelled => break,
            }
        }
        Ok(completed)
    }

    /// Runs rounds until `stop` is set, calling `on_round` after each
    /// completed one, and returns a copy of the best strain.
    pub fn run<F>(&mut self, stop: &StopToken, mut on_round: F) -> Result<Strain>
    where
        F: FnMut(&RoundReport<'_>),
    {
        while self.run_round(stop)? == RoundOutcome::Completed {
            on_round(&self.report());
        }
        let best = self.best();
        info!(
            rounds = self.rounds,
            strain = best.id(),
            pain = %best.pain(),
            "search stopped"
        );
        Ok(best.clone())
    }
}
