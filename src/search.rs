//! # Local search
//!
//! A [`Strain`] is one independently evolving solution with its own random
//! generator. Each generation works on a copy of the strain's group: it
//! evicts free agents that are at least as unhappy as the current worst (plus
//! a random share of everyone else), lets the [`AssignmentHeuristic`] put the
//! evicted people back, and keeps the result if its [`PainIndex`] is no worse.
//!
//! Accepting equal scores lets a strain drift across plateaus instead of
//! stalling on the first local optimum.

use std::ops::Range;

use tracing::{debug, trace};

use crate::error::Result;
use crate::group::TeamGroup;
use crate::heuristic::AssignmentHeuristic;
use crate::options::PoolOptions;
use crate::pain::{PainIndex, PainModel};
use crate::rng::RandomNumberGenerator;
use crate::roster::PersonId;
use crate::stop::StopToken;

/// One independently evolving solution.
#[derive(Debug, Clone)]
pub struct Strain {
    id: usize,
    group: TeamGroup,
    pain: PainIndex,
    rng: RandomNumberGenerator,
    generations: u64,
}

impl Strain {
    /// Wraps an already populated group.
    pub fn new(id: usize, group: TeamGroup, model: &PainModel, rng: RandomNumberGenerator) -> Self {
        let pain = model.pain_index(&group);
        Self {
            id,
            group,
            pain,
            rng,
            generations: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn group(&self) -> &TeamGroup {
        &self.group
    }

    pub fn pain(&self) -> PainIndex {
        self.pain
    }

    /// Generations run so far, accepted or not.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Consumes the strain, keeping only its group.
    pub fn into_group(self) -> TeamGroup {
        self.group
    }
}

/// What a single generation did to its strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The new group scored strictly better and replaced the old one.
    Improved,
    /// The new group scored the same and replaced the old one.
    Lateral,
    /// The new group scored worse and was thrown away.
    Rejected,
}

/// How a call to [`LocalSearchEngine::evolve`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveOutcome {
    Completed,
    Interrupted,
}

/// Destroy-and-repair search over a single strain.
#[derive(Debug, Clone)]
pub struct LocalSearchEngine {
    model: PainModel,
    heuristic: AssignmentHeuristic,
    initial_obedience: f64,
    repair_obedience: Range<f64>,
    sanity_interval: u64,
}

impl LocalSearchEngine {
    pub fn new(model: PainModel, options: &PoolOptions) -> Self {
        Self {
            model,
            heuristic: AssignmentHeuristic::new(model),
            initial_obedience: options.initial_obedience(),
            repair_obedience: options.repair_obedience(),
            sanity_interval: options.sanity_interval(),
        }
    }

    pub fn model(&self) -> &PainModel {
        &self.model
    }

    /// Builds a fresh strain from `base`: every free agent is released and
    /// the whole unassigned pool is placed with the initial obedience.
    /// Pinned people keep their seats.
    pub fn spawn(&self, id: usize, base: &TeamGroup, mut rng: RandomNumberGenerator) -> Strain {
        let mut group = base.clone();
        group.release_free_agents();
        let placed = self
            .heuristic
            .populate(&mut group, self.initial_obedience, &mut rng);
        trace!(strain = id, placed, "strain populated");
        Strain::new(id, group, &self.model, rng)
    }

    /// Evicts free agents from their teams into the unassigned pool.
    ///
    /// A person is evicted if their pain exceeds `ceiling`, or otherwise with
    /// probability `percentage / 100`. Victims are chosen against the group
    /// as it is before anyone leaves. Returns how many were evicted.
    pub fn destroy(
        &self,
        group: &mut TeamGroup,
        percentage: f64,
        ceiling: i64,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut victims: Vec<PersonId> = Vec::new();
        for team in group.teams() {
            for &person in team.members() {
                if !group.roster().person(person).is_free_agent() {
                    continue;
                }
                let pain = self.model.person_pain(group, person, team.id());
                if pain > ceiling || rng.chance(percentage) {
                    victims.push(person);
                }
            }
        }
        for &person in &victims {
            group.unassign(person);
        }
        victims.len()
    }

    /// Runs one destroy-and-repair step on `strain`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RosterError::Invariant`] if a periodic
    /// consistency check of the new group fails.
    pub fn generation(&self, strain: &mut Strain) -> Result<GenerationOutcome> {
        let mut candidate = strain.group.clone();
        let percentage = strain.rng.gen_range(1..100) as f64;
        let ceiling = strain.pain.max_pain().saturating_sub(1);

        let evicted = self.destroy(&mut candidate, percentage, ceiling, &mut strain.rng);
        let obedience = strain.rng.percent_in(self.repair_obedience.clone());
        self.heuristic
            .populate(&mut candidate, obedience, &mut strain.rng);

        strain.generations += 1;
        if self.sanity_interval > 0 && strain.generations % self.sanity_interval == 0 {
            candidate.sanity_check()?;
        }

        let pain = self.model.pain_index(&candidate);
        trace!(
            strain = strain.id,
            evicted,
            percentage,
            %pain,
            current = %strain.pain,
            "generation"
        );

        let outcome = if pain < strain.pain {
            GenerationOutcome::Improved
        } else if pain == strain.pain {
            GenerationOutcome::Lateral
        } else {
            return Ok(GenerationOutcome::Rejected);
        };
        if outcome == GenerationOutcome::Improved {
            debug!(strain = strain.id, from = %strain.pain, to = %pain, "strain improved");
        }
        strain.group = candidate;
        strain.pain = pain;
        Ok(outcome)
    }

    /// Runs up to `generations` generations, checking `stop` before each one.
    pub fn evolve(
        &self,
        strain: &mut Strain,
        generations: usize,
        stop: &StopToken,
    ) -> Result<EvolveOutcome> {
        for _ in 0..generations {
            if stop.is_set() {
                debug!(strain = strain.id, "strain interrupted");
                return Ok(EvolveOutcome::Interrupted);
            }
            self.generation(strain)?;
        }
        Ok(EvolveOutcome::Completed)
    }
}
