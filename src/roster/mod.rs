//! # Roster
//!
//! The immutable half of a solution: who the people are, which teams exist,
//! and which trait labels are in play. A [`Roster`] is built once by
//! [`RosterBuilder`] and then shared behind an `Arc` by every
//! [`TeamGroup`](crate::group::TeamGroup) cloned from it, so copying a
//! candidate solution never copies names or preference lists.

pub mod builder;
pub mod ids;

use std::collections::HashMap;

pub use builder::{PersonSpec, RosterBuilder, TeamSpec};
pub use ids::{PersonId, TeamId, TraitId};

/// A person taking part in the assignment.
///
/// All lists are deduplicated when the roster is built. `friends` and `foes`
/// keep the declared order. `friend_set` and `foe_set` hold the same people
/// sorted by id, as does the reverse index `listed_as_foe_by`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    preferences: Vec<TeamId>,
    friends: Vec<PersonId>,
    foes: Vec<PersonId>,
    friend_set: Vec<PersonId>,
    foe_set: Vec<PersonId>,
    traits: Vec<TraitId>,
    listed_as_foe_by: Vec<PersonId>,
    pinned: Option<TeamId>,
}

impl Person {
    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preferred teams, best first.
    pub fn preferences(&self) -> &[TeamId] {
        &self.preferences
    }

    pub fn friends(&self) -> &[PersonId] {
        &self.friends
    }

    pub fn foes(&self) -> &[PersonId] {
        &self.foes
    }

    /// This person's friends, sorted by id.
    pub fn friend_set(&self) -> &[PersonId] {
        &self.friend_set
    }

    /// This person's foes, sorted by id.
    pub fn foe_set(&self) -> &[PersonId] {
        &self.foe_set
    }

    pub fn traits(&self) -> &[TraitId] {
        &self.traits
    }

    /// People who list this person as a foe, sorted by id.
    pub fn listed_as_foe_by(&self) -> &[PersonId] {
        &self.listed_as_foe_by
    }

    /// The team this person was placed on by the loader, if any.
    pub fn pinned_team(&self) -> Option<TeamId> {
        self.pinned
    }

    /// A free agent may be evicted and placed again by the search. Pinned
    /// people never are.
    pub fn is_free_agent(&self) -> bool {
        self.pinned.is_none()
    }

    /// Zero-based rank of `team` in this person's preferences.
    pub fn rank_of(&self, team: TeamId) -> Option<usize> {
        self.preferences.iter().position(|&t| t == team)
    }

    pub fn has_trait(&self, trait_id: TraitId) -> bool {
        self.traits.contains(&trait_id)
    }
}

/// The fixed description of a team: name, capacity and trait quotas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDef {
    id: TeamId,
    name: String,
    capacity: usize,
    quotas: Vec<(TraitId, u32)>,
}

impl TeamDef {
    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Required trait counts in declaration order.
    pub fn quotas(&self) -> &[(TraitId, u32)] {
        &self.quotas
    }

    pub fn quota(&self, trait_id: TraitId) -> u32 {
        self.quotas
            .iter()
            .find(|(t, _)| *t == trait_id)
            .map_or(0, |(_, n)| *n)
    }
}

/// Every person, team definition and trait label of one run.
#[derive(Debug, Clone)]
pub struct Roster {
    teams: Vec<TeamDef>,
    people: Vec<Person>,
    traits: Vec<String>,
    team_index: HashMap<String, TeamId>,
    person_index: HashMap<String, PersonId>,
}

impl Roster {
    pub fn teams(&self) -> &[TeamDef] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> &TeamDef {
        &self.teams[id.index()]
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    pub fn population(&self) -> usize {
        self.people.len()
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    pub fn trait_name(&self, id: TraitId) -> &str {
        &self.traits[id.index()]
    }

    /// Looks a team up by name; the name is normalized first.
    pub fn find_team(&self, name: &str) -> Option<TeamId> {
        self.team_index.get(&ids::normalize(name)).copied()
    }

    /// Looks a person up by name; the name is normalized first.
    pub fn find_person(&self, name: &str) -> Option<PersonId> {
        self.person_index.get(&ids::normalize(name)).copied()
    }

    /// Total number of seats over all teams.
    pub fn total_capacity(&self) -> usize {
        self.teams.iter().map(TeamDef::capacity).sum()
    }
}
