//! # TeamGroup
//!
//! The mutable half of a solution. A `TeamGroup` holds one [`Team`] per team
//! definition, the pool of unassigned people, and a person → team map. The
//! [`Roster`] it points to is shared, so cloning a group copies only member
//! lists and trait counters.
//!
//! At every point observable through the public API each person is in exactly
//! one container: one team's member list or the unassigned pool.
//! [`TeamGroup::sanity_check`] verifies that, team capacities, and that the
//! incrementally maintained trait counts match the members.

use std::sync::Arc;

use crate::error::{Result, RosterError};
use crate::roster::{Person, PersonId, Roster, TeamDef, TeamId, TraitId};

/// Members and trait counts of one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    capacity: usize,
    members: Vec<PersonId>,
    trait_counts: Vec<u32>,
}

impl Team {
    fn new(def: &TeamDef, trait_count: usize) -> Self {
        Self {
            id: def.id(),
            capacity: def.capacity(),
            members: Vec::with_capacity(def.capacity()),
            trait_counts: vec![0; trait_count],
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current members, sorted by id.
    pub fn members(&self) -> &[PersonId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn has_room(&self) -> bool {
        self.members.len() < self.capacity
    }

    pub fn room_remaining(&self) -> usize {
        self.capacity.saturating_sub(self.members.len())
    }

    pub fn contains(&self, person: PersonId) -> bool {
        self.members.binary_search(&person).is_ok()
    }

    /// Number of current members holding `trait_id`.
    pub fn trait_count(&self, trait_id: TraitId) -> u32 {
        self.trait_counts[trait_id.index()]
    }

    fn insert(&mut self, person: &Person) -> bool {
        if !self.has_room() {
            return false;
        }
        match self.members.binary_search(&person.id()) {
            Ok(_) => false,
            Err(pos) => {
                self.members.insert(pos, person.id());
                for t in person.traits() {
                    self.trait_counts[t.index()] += 1;
                }
                true
            }
        }
    }

    fn remove(&mut self, person: &Person) -> bool {
        match self.members.binary_search(&person.id()) {
            Ok(pos) => {
                self.members.remove(pos);
                for t in person.traits() {
                    self.trait_counts[t.index()] -= 1;
                }
                true
            }
            Err(_) => false,
        }
    }
}

/// A complete candidate solution: every team plus the unassigned pool.
#[derive(Debug, Clone)]
pub struct TeamGroup {
    roster: Arc<Roster>,
    teams: Vec<Team>,
    unassigned: Vec<PersonId>,
    placement: Vec<Option<TeamId>>,
}

impl TeamGroup {
    /// Creates a group with empty teams and everyone in the unassigned pool.
    pub fn new(roster: Arc<Roster>) -> Self {
        let trait_count = roster.trait_count();
        let teams = roster
            .teams()
            .iter()
            .map(|def| Team::new(def, trait_count))
            .collect();
        let unassigned = roster.people().iter().map(Person::id).collect();
        let placement = vec![None; roster.population()];
        Self {
            roster,
            teams,
            unassigned,
            placement,
        }
    }

    /// Creates a group and places every pinned person on their team.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::OverCapacity`] if the pinned people of a team
    /// don't fit.
    pub fn with_pinned(roster: Arc<Roster>) -> Result<Self> {
        let mut group = Self::new(Arc::clone(&roster));
        for person in roster.people() {
            if let Some(team) = person.pinned_team() {
                if !group.assign(person.id(), team) {
                    let def = roster.team(team);
                    return Err(RosterError::OverCapacity {
                        team: def.name().to_string(),
                        person: person.name().to_string(),
                        capacity: def.capacity(),
                    });
                }
            }
        }
        Ok(group)
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Teams in declaration order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    /// The unassigned pool.
    pub fn unassigned(&self) -> &[PersonId] {
        &self.unassigned
    }

    pub fn team_of(&self, person: PersonId) -> Option<TeamId> {
        self.placement[person.index()]
    }

    /// Number of people sitting on a team.
    pub fn assigned_count(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }

    /// Required trait slots of `team` that its members don't fill yet, as
    /// `(trait, shortfall)` pairs in quota order.
    pub fn unfilled_traits(&self, team: TeamId) -> Vec<(TraitId, u32)> {
        let state = &self.teams[team.index()];
        self.roster
            .team(team)
            .quotas()
            .iter()
            .filter_map(|&(t, need)| {
                let shortfall = need.saturating_sub(state.trait_count(t));
                (shortfall > 0).then_some((t, shortfall))
            })
            .collect()
    }

    /// Total number of unfilled trait slots on `team`.
    pub fn unfilled_trait_count(&self, team: TeamId) -> u32 {
        let state = &self.teams[team.index()];
        self.roster
            .team(team)
            .quotas()
            .iter()
            .map(|&(t, need)| need.saturating_sub(state.trait_count(t)))
            .sum()
    }

    /// Puts `person` on `team`.
    ///
    /// Returns false, leaving the group untouched, if the person already sits
    /// on a team or the team is full. On success the person leaves the
    /// unassigned pool.
    pub fn assign(&mut self, person: PersonId, team: TeamId) -> bool {
        if self.placement[person.index()].is_some() {
            return false;
        }
        let entry = self.roster.person(person);
        if !self.teams[team.index()].insert(entry) {
            return false;
        }
        self.placement[person.index()] = Some(team);
        if let Some(pos) = self.unassigned.iter().position(|&p| p == person) {
            self.unassigned.remove(pos);
        }
        true
    }

    /// Moves `person` from their team into the unassigned pool.
    ///
    /// Returns false if the person wasn't on a team.
    pub fn unassign(&mut self, person: PersonId) -> bool {
        let Some(team) = self.placement[person.index()] else {
            return false;
        };
        let entry = self.roster.person(person);
        if !self.teams[team.index()].remove(entry) {
            return false;
        }
        self.placement[person.index()] = None;
        self.unassigned.push(person);
        true
    }

    /// Moves every free agent that sits on a team back into the unassigned
    /// pool. Pinned people stay where they are.
    pub fn release_free_agents(&mut self) -> usize {
        let released: Vec<PersonId> = self
            .teams
            .iter()
            .flat_map(|team| team.members().iter().copied())
            .filter(|&p| self.roster.person(p).is_free_agent())
            .collect();
        for &person in &released {
            self.unassign(person);
        }
        released.len()
    }

    /// Empties the unassigned pool, handing its people to the caller. They
    /// must be assigned or given back through [`Self::return_unassigned`].
    pub(crate) fn take_unassigned(&mut self) -> Vec<PersonId> {
        std::mem::take(&mut self.unassigned)
    }

    pub(crate) fn return_unassigned(&mut self, person: PersonId) {
        debug_assert!(self.placement[person.index()].is_none());
        self.unassigned.push(person);
    }

    /// Checks membership and trait bookkeeping against the roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Invariant`] describing the first problem found:
    /// - a team holds more people than its capacity
    /// - a person is missing, or appears in more than one container
    /// - the person → team map disagrees with a member list
    /// - a team's trait counts differ from a recount of its members
    pub fn sanity_check(&self) -> Result<()> {
        let mut seen = vec![false; self.roster.population()];
        let mut mark = |person: PersonId| -> Result<()> {
            let slot = seen.get_mut(person.index()).ok_or_else(|| {
                RosterError::Invariant(format!("unknown person id {}", person))
            })?;
            if *slot {
                return Err(RosterError::Invariant(format!(
                    "person '{}' is in more than one place",
                    self.roster.person(person).name()
                )));
            }
            *slot = true;
            Ok(())
        };

        for team in &self.teams {
            let name = self.roster.team(team.id()).name();
            if team.len() > team.capacity() {
                return Err(RosterError::Invariant(format!(
                    "team '{}' holds {} people but has capacity {}",
                    name,
                    team.len(),
                    team.capacity()
                )));
            }
            let mut recount = vec![0u32; team.trait_counts.len()];
            for &person in team.members() {
                mark(person)?;
                if self.placement[person.index()] != Some(team.id()) {
                    return Err(RosterError::Invariant(format!(
                        "'{}' is listed on team '{}' but mapped elsewhere",
                        self.roster.person(person).name(),
                        name
                    )));
                }
                for t in self.roster.person(person).traits() {
                    recount[t.index()] += 1;
                }
            }
            if recount != team.trait_counts {
                return Err(RosterError::Invariant(format!(
                    "trait counts of team '{}' drifted from its members",
                    name
                )));
            }
        }
        for &person in &self.unassigned {
            mark(person)?;
            if self.placement[person.index()].is_some() {
                return Err(RosterError::Invariant(format!(
                    "'{}' is unassigned but mapped to a team",
                    self.roster.person(person).name()
                )));
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(RosterError::Invariant(format!(
                "person '{}' is neither on a team nor unassigned",
                self.roster.people()[missing].name()
            )));
        }
        Ok(())
    }
}
