//! # Assignment heuristic
//!
//! Places one person at a time. Every team with room is scored by the pain the
//! person would feel there, adjusted for the team's point of view: a team that
//! already holds someone who lists the person as a foe is penalized, and
//! each unfilled trait the person would fill earns a reward.
//!
//! Candidates are shuffled and then stably sorted by `(pain, room left)`, so
//! equal-pain teams come out in random order except that tighter teams go
//! first. The walk follows that order only with probability `obedience / 100`
//! per step, which keeps some exploration in the repair phase of the search.

use tracing::warn;

use crate::group::TeamGroup;
use crate::pain::PainModel;
use crate::rng::RandomNumberGenerator;
use crate::roster::ids::intersects;
use crate::roster::{PersonId, TeamId};

/// A team the person could join and what it would cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub team: TeamId,
    pub pain: i64,
    pub room: usize,
}

/// Greedy, randomized insertion of unassigned people.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentHeuristic {
    model: PainModel,
}

impl AssignmentHeuristic {
    pub fn new(model: PainModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &PainModel {
        &self.model
    }

    /// Score of placing `person` on `team` as seen by the heuristic.
    pub fn insertion_pain(&self, group: &TeamGroup, person: PersonId, team: TeamId) -> i64 {
        let weights = self.model.weights();
        let entry = group.roster().person(person);
        let mut pain = self.model.person_pain(group, person, team);

        // someone already there doesn't want this person
        let members = group.team(team).members();
        if intersects(entry.listed_as_foe_by(), members) {
            pain += weights.foe_penalty;
        }

        let fills = group
            .unfilled_traits(team)
            .iter()
            .filter(|(t, _)| entry.has_trait(*t))
            .count() as i64;
        pain - fills * weights.trait_weight
    }

    /// Teams with room for `person`, best first.
    pub fn candidates(
        &self,
        group: &TeamGroup,
        person: PersonId,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = group
            .teams()
            .iter()
            .filter(|team| team.has_room())
            .map(|team| Candidate {
                team: team.id(),
                pain: self.insertion_pain(group, person, team.id()),
                room: team.room_remaining() - 1,
            })
            .collect();
        rng.shuffle(&mut candidates);
        candidates.sort_by_key(|c| (c.pain, c.room));
        candidates
    }

    /// Places `person`, who must not currently sit on a team.
    ///
    /// Walks the ranked candidates, taking each with probability
    /// `obedience / 100`; if every step is skipped, falls back to the first
    /// team in declaration order with room. Returns `None`, leaving the group
    /// unchanged, if no team has room.
    pub fn try_insert(
        &self,
        group: &mut TeamGroup,
        person: PersonId,
        obedience: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Option<TeamId> {
        for candidate in self.candidates(group, person, rng) {
            if rng.chance(obedience) && group.assign(person, candidate.team) {
                return Some(candidate.team);
            }
        }

        for index in 0..group.teams().len() {
            let team = TeamId::new(index);
            if group.assign(person, team) {
                return Some(team);
            }
        }

        warn!(
            person = group.roster().person(person).name(),
            "no space available for person"
        );
        None
    }

    /// Places everyone in the unassigned pool, in random order. People who
    /// don't fit anywhere stay unassigned. Returns how many were placed.
    pub fn populate(
        &self,
        group: &mut TeamGroup,
        obedience: f64,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut pending = group.take_unassigned();
        rng.shuffle(&mut pending);

        let mut placed = 0;
        for person in pending {
            match self.try_insert(group, person, obedience, rng) {
                Some(_) => placed += 1,
                None => group.return_unassigned(person),
            }
        }
        placed
    }
}
