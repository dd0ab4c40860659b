//! # RosterBuilder
//!
//! Collects team and person descriptions by name, validates them, and turns
//! them into a [`TeamGroup`] whose people are either pinned to their initial
//! team or waiting in the unassigned pool.
//!
//! ## Example
//!
//! ```rust
//! use teampref::roster::{PersonSpec, RosterBuilder, TeamSpec};
//!
//! let group = RosterBuilder::new()
//!     .team(TeamSpec::new("Red", 2).quota("Leader", 1))
//!     .team(TeamSpec::new("Blue", 2))
//!     .person(PersonSpec::new("Ann").prefers(["blue", "red"]).traits(["leader"]))
//!     .person(PersonSpec::new("Bob").prefers(["red"]).foes(["ann"]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(group.roster().population(), 2);
//! assert_eq!(group.unassigned().len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::ids::{dedup_preserving, normalize, sorted_ids, PersonId, TeamId, TraitId};
use super::{Person, Roster, TeamDef};
use crate::error::{Result, RosterError};
use crate::group::TeamGroup;

/// Name-level description of a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSpec {
    name: String,
    capacity: i64,
    quotas: Vec<(String, i64)>,
}

impl TeamSpec {
    /// A team with the given capacity and no trait requirements.
    pub fn new(name: impl Into<String>, capacity: i64) -> Self {
        Self {
            name: name.into(),
            capacity,
            quotas: Vec::new(),
        }
    }

    /// Requires `count` members holding `trait_name`.
    pub fn quota(mut self, trait_name: impl Into<String>, count: i64) -> Self {
        self.quotas.push((trait_name.into(), count));
        self
    }
}

/// Name-level description of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSpec {
    name: String,
    team: Option<String>,
    preferences: Vec<String>,
    friends: Vec<String>,
    foes: Vec<String>,
    traits: Vec<String>,
}

impl PersonSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pins the person to a team; the search will never move them.
    pub fn on_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Team preferences, best first.
    pub fn prefers<I, S>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = teams.into_iter().map(Into::into).collect();
        self
    }

    pub fn friends<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.friends = people.into_iter().map(Into::into).collect();
        self
    }

    pub fn foes<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foes = people.into_iter().map(Into::into).collect();
        self
    }

    pub fn traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Default)]
struct TraitTable {
    labels: Vec<String>,
    index: HashMap<String, TraitId>,
}

impl TraitTable {
    fn intern(&mut self, label: &str) -> TraitId {
        if let Some(id) = self.index.get(label) {
            return *id;
        }
        let id = TraitId::new(self.labels.len());
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }
}

/// Validates team and person descriptions and builds the initial
/// [`TeamGroup`].
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    teams: Vec<TeamSpec>,
    people: Vec<PersonSpec>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(mut self, team: TeamSpec) -> Self {
        self.teams.push(team);
        self
    }

    pub fn person(mut self, person: PersonSpec) -> Self {
        self.people.push(person);
        self
    }

    pub fn add_team(&mut self, team: TeamSpec) -> &mut Self {
        self.teams.push(team);
        self
    }

    pub fn add_person(&mut self, person: PersonSpec) -> &mut Self {
        self.people.push(person);
        self
    }

    /// Builds the roster and a group in which pinned people sit on their
    /// team and everyone else is unassigned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a team has a capacity below 1 or a malformed trait quota
    /// - a team or person name is empty or appears twice
    /// - a preference or pinned team names a team that doesn't exist
    /// - a friend or foe names a person that doesn't exist
    /// - pinned people overflow their team's capacity
    pub fn build(self) -> Result<TeamGroup> {
        let roster = self.build_roster()?;
        TeamGroup::with_pinned(Arc::new(roster))
    }

    fn build_roster(self) -> Result<Roster> {
        let mut traits = TraitTable::default();

        let mut team_index = HashMap::with_capacity(self.teams.len());
        let mut teams = Vec::with_capacity(self.teams.len());
        for spec in self.teams {
            let name = normalize(&spec.name);
            if name.is_empty() {
                return Err(RosterError::Configuration(
                    "Team names cannot be empty".to_string(),
                ));
            }
            if spec.capacity < 1 {
                return Err(RosterError::Configuration(format!(
                    "Capacity of team '{}' was too small ({}) to have team members",
                    name, spec.capacity
                )));
            }
            if team_index.contains_key(&name) {
                return Err(RosterError::DuplicateTeam(name));
            }

            let mut quotas: Vec<(TraitId, u32)> = Vec::with_capacity(spec.quotas.len());
            for (label, count) in &spec.quotas {
                let label = normalize(label);
                if label.is_empty() || *count < 0 {
                    return Err(RosterError::Configuration(format!(
                        "Team '{}' has a malformed trait quota '{} {}'",
                        name, label, count
                    )));
                }
                let trait_id = traits.intern(&label);
                if quotas.iter().any(|(t, _)| *t == trait_id) {
                    return Err(RosterError::Configuration(format!(
                        "Team '{}' lists trait '{}' more than once",
                        name, label
                    )));
                }
                let count = u32::try_from(*count).map_err(|_| {
                    RosterError::Configuration(format!(
                        "Team '{}' has a trait quota too large for '{}' ({})",
                        name, label, count
                    ))
                })?;
                quotas.push((trait_id, count));
            }

            let id = TeamId::new(teams.len());
            team_index.insert(name.clone(), id);
            teams.push(TeamDef {
                id,
                name,
                capacity: spec.capacity as usize,
                quotas,
            });
        }

        let mut person_index = HashMap::with_capacity(self.people.len());
        let mut names = Vec::with_capacity(self.people.len());
        for (i, spec) in self.people.iter().enumerate() {
            let name = normalize(&spec.name);
            if name.is_empty() {
                return Err(RosterError::Configuration(
                    "Person names cannot be empty".to_string(),
                ));
            }
            if person_index.insert(name.clone(), PersonId::new(i)).is_some() {
                return Err(RosterError::DuplicatePerson(name));
            }
            names.push(name);
        }

        let lookup_team = |owner: &str, team: String| -> Result<TeamId> {
            team_index
                .get(&team)
                .copied()
                .ok_or_else(|| RosterError::UnknownTeam {
                    owner: owner.to_string(),
                    team,
                })
        };

        let mut people = Vec::with_capacity(self.people.len());
        for (i, (spec, name)) in self.people.into_iter().zip(names).enumerate() {
            let id = PersonId::new(i);

            let preferences = normalized_list(&spec.preferences)
                .into_iter()
                .map(|team| lookup_team(&name, team))
                .collect::<Result<Vec<_>>>()?;
            let friends = resolve_people(&name, id, &spec.friends, &person_index)?;
            let foes = resolve_people(&name, id, &spec.foes, &person_index)?;
            let person_traits = normalized_list(&spec.traits)
                .iter()
                .map(|label| traits.intern(label))
                .collect();
            let pinned = match spec.team.as_deref().map(normalize) {
                Some(team) if !team.is_empty() => Some(lookup_team(&name, team)?),
                _ => None,
            };

            people.push(Person {
                id,
                name,
                preferences,
                friend_set: sorted_ids(friends.iter().copied()),
                foe_set: sorted_ids(foes.iter().copied()),
                friends,
                foes,
                traits: person_traits,
                listed_as_foe_by: Vec::new(),
                pinned,
            });
        }

        let mut foe_of = vec![Vec::new(); people.len()];
        for person in &people {
            for foe in &person.foes {
                foe_of[foe.index()].push(person.id);
            }
        }
        for (person, foes) in people.iter_mut().zip(foe_of) {
            person.listed_as_foe_by = sorted_ids(foes);
        }

        Ok(Roster {
            teams,
            people,
            traits: traits.labels,
            team_index,
            person_index,
        })
    }
}

fn normalized_list(items: &[String]) -> Vec<String> {
    dedup_preserving(items.iter().map(|s| normalize(s)).filter(|s| !s.is_empty()))
}

fn resolve_people(
    owner: &str,
    owner_id: PersonId,
    names: &[String],
    index: &HashMap<String, PersonId>,
) -> Result<Vec<PersonId>> {
    let mut out = Vec::with_capacity(names.len());
    for name in normalized_list(names) {
        let id = index
            .get(&name)
            .copied()
            .ok_or_else(|| RosterError::UnknownPerson {
                owner: owner.to_string(),
                person: name.clone(),
            })?;
        if id == owner_id {
            warn!(person = owner, "ignoring self-reference in friend/foe list");
            continue;
        }
        out.push(id);
    }
    Ok(out)
}
