//! # Pain model
//!
//! Scores how unhappy people are with a [`TeamGroup`]. A person's pain on a
//! team is
//!
//! - the rank of the team in their preferences, or the length of the
//!   preference list if the team isn't listed;
//! - plus `foe_penalty` for every one of their foes on the team;
//! - plus `friend_weight` (negative) for every one of their friends on the team;
//! - plus the team's trait pain, `trait_weight` times the number of unfilled
//!   trait slots, shared by every member.
//!
//! The search minimizes the [`PainIndex`] of the whole group: the worst pain,
//! then how many people have it, then the mean.
//!
//! ## Example
//!
//! ```rust
//! use teampref::pain::{PainIndex, PainModel};
//! use teampref::roster::{PersonSpec, RosterBuilder, TeamSpec};
//!
//! let mut group = RosterBuilder::new()
//!     .team(TeamSpec::new("a", 1))
//!     .team(TeamSpec::new("b", 1))
//!     .person(PersonSpec::new("x").prefers(["b"]))
//!     .person(PersonSpec::new("y").prefers(["a"]))
//!     .build()
//!     .unwrap();
//! let roster = group.roster().clone();
//! group.assign(roster.find_person("x").unwrap(), roster.find_team("b").unwrap());
//! group.assign(roster.find_person("y").unwrap(), roster.find_team("a").unwrap());
//!
//! let model = PainModel::default();
//! assert_eq!(model.pain_index(&group), PainIndex::new(0, 2, 0.0));
//! ```

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::group::TeamGroup;
use crate::roster::ids::intersection_len;
use crate::roster::{Person, PersonId, TeamId};

/// Max and mean pain reported for a team without members.
pub const EMPTY_TEAM_PAIN: i64 = -1000;

/// The tunable constants of the pain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PainWeights {
    /// Added for every foe of the person on their team.
    pub foe_penalty: i64,
    /// Added for every friend of the person on their team.
    pub friend_weight: i64,
    /// Added to every member's pain per unfilled trait slot on their team.
    pub trait_weight: i64,
}

impl Default for PainWeights {
    fn default() -> Self {
        Self {
            foe_penalty: 10,
            friend_weight: -1,
            trait_weight: 3,
        }
    }
}

/// The objective the search minimizes: `(max_pain, count_at_max, mean_pain)`,
/// ordered lexicographically, smaller is better.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PainIndex {
    max_pain: i64,
    count_at_max: usize,
    mean_pain: f64,
}

impl PainIndex {
    /// The index of a group with nobody to score. Worse than any real index.
    pub const UNSCORED: PainIndex = PainIndex {
        max_pain: i64::MAX,
        count_at_max: usize::MAX,
        mean_pain: f64::INFINITY,
    };

    pub fn new(max_pain: i64, count_at_max: usize, mean_pain: f64) -> Self {
        Self {
            max_pain,
            count_at_max,
            mean_pain,
        }
    }

    /// Builds the index of a multiset of individual pains.
    pub fn from_pains(pains: &[i64]) -> Self {
        let Some(&max_pain) = pains.iter().max() else {
            return Self::UNSCORED;
        };
        let count_at_max = pains.iter().filter(|&&p| p == max_pain).count();
        let mean_pain = pains.iter().sum::<i64>() as f64 / pains.len() as f64;
        Self::new(max_pain, count_at_max, mean_pain)
    }

    pub fn max_pain(&self) -> i64 {
        self.max_pain
    }

    pub fn count_at_max(&self) -> usize {
        self.count_at_max
    }

    pub fn mean_pain(&self) -> f64 {
        self.mean_pain
    }

    pub fn is_scored(&self) -> bool {
        *self != Self::UNSCORED
    }
}

impl Ord for PainIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.max_pain
            .cmp(&other.max_pain)
            .then(self.count_at_max.cmp(&other.count_at_max))
            .then(self.mean_pain.total_cmp(&other.mean_pain))
    }
}

impl PartialOrd for PainIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PainIndex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PainIndex {}

impl fmt::Display for PainIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_scored() {
            return write!(f, "unscored");
        }
        write!(
            f,
            "{},{},{:.2}",
            self.max_pain, self.count_at_max, self.mean_pain
        )
    }
}

/// Pure scoring functions over people, teams and whole groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PainModel {
    weights: PainWeights,
}

impl PainModel {
    pub fn new(weights: PainWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PainWeights {
        &self.weights
    }

    /// Rank of `team` in the person's preferences, or the preference count
    /// when the team isn't ranked.
    pub fn preference_pain(&self, person: &Person, team: TeamId) -> i64 {
        person
            .rank_of(team)
            .unwrap_or(person.preferences().len()) as i64
    }

    /// Pain shared by every member of `team` for its unfilled trait slots.
    pub fn trait_pain(&self, group: &TeamGroup, team: TeamId) -> i64 {
        self.weights.trait_weight * group.unfilled_trait_count(team) as i64
    }

    /// Pain of `person` on `team` given the team's current members. The
    /// person does not have to be on the team.
    pub fn person_pain(&self, group: &TeamGroup, person: PersonId, team: TeamId) -> i64 {
        let entry = group.roster().person(person);
        let members = group.team(team).members();
        let foes = intersection_len(entry.foe_set(), members) as i64;
        let friends = intersection_len(entry.friend_set(), members) as i64;

        self.preference_pain(entry, team)
            + self.weights.foe_penalty * foes
            + self.weights.friend_weight * friends
            + self.trait_pain(group, team)
    }

    /// Pain of every member of `team`, in member order.
    pub fn team_pains(&self, group: &TeamGroup, team: TeamId) -> Vec<i64> {
        group
            .team(team)
            .members()
            .iter()
            .map(|&p| self.person_pain(group, p, team))
            .collect()
    }

    /// Highest member pain, or [`EMPTY_TEAM_PAIN`] for an empty team.
    pub fn team_max_pain(&self, group: &TeamGroup, team: TeamId) -> i64 {
        self.team_pains(group, team)
            .into_iter()
            .max()
            .unwrap_or(EMPTY_TEAM_PAIN)
    }

    /// Mean member pain, or [`EMPTY_TEAM_PAIN`] for an empty team.
    pub fn team_mean_pain(&self, group: &TeamGroup, team: TeamId) -> f64 {
        let pains = self.team_pains(group, team);
        if pains.is_empty() {
            return EMPTY_TEAM_PAIN as f64;
        }
        pains.iter().sum::<i64>() as f64 / pains.len() as f64
    }

    /// Pain an unassigned person contributes to the group index: the same as
    /// sitting on a team they didn't rank.
    pub fn unassigned_pain(&self, person: &Person) -> i64 {
        person.preferences().len() as i64
    }

    /// Every individual pain of the group: members on their team, then the
    /// unassigned pool.
    pub fn pains(&self, group: &TeamGroup) -> Vec<i64> {
        let mut pains = Vec::with_capacity(group.roster().population());
        for team in group.teams() {
            pains.extend(
                team.members()
                    .iter()
                    .map(|&p| self.person_pain(group, p, team.id())),
            );
        }
        pains.extend(
            group
                .unassigned()
                .iter()
                .map(|&p| self.unassigned_pain(group.roster().person(p))),
        );
        pains
    }

    /// The group's [`PainIndex`].
    pub fn pain_index(&self, group: &TeamGroup) -> PainIndex {
        PainIndex::from_pains(&self.pains(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{PersonSpec, RosterBuilder, TeamSpec};

    fn place(group: &mut TeamGroup, person: &str, team: &str) {
        let roster = group.roster().clone();
        let p = roster.find_person(person).unwrap();
        let t = roster.find_team(team).unwrap();
        assert!(group.assign(p, t));
    }

    fn pain_of(model: &PainModel, group: &TeamGroup, person: &str) -> i64 {
        let p = group.roster().find_person(person).unwrap();
        model.person_pain(group, p, group.team_of(p).unwrap())
    }

    #[test]
    fn test_preference_rank_and_unranked_penalty() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 3))
            .team(TeamSpec::new("b", 3))
            .team(TeamSpec::new("c", 3))
            .person(PersonSpec::new("x").prefers(["c", "a"]))
            .person(PersonSpec::new("y").prefers(["c", "a"]))
            .person(PersonSpec::new("z").prefers(["c", "a"]))
            .build()
            .unwrap();
        place(&mut group, "x", "c");
        place(&mut group, "y", "a");
        place(&mut group, "z", "b");

        let model = PainModel::default();
        assert_eq!(pain_of(&model, &group, "x"), 0);
        assert_eq!(pain_of(&model, &group, "y"), 1);
        assert_eq!(pain_of(&model, &group, "z"), 2);
        assert_eq!(model.pain_index(&group), PainIndex::new(2, 1, 1.0));
    }

    #[test]
    fn test_friends_and_foes_on_team() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 4))
            .person(PersonSpec::new("target").friends(["pal", "other"]).foes(["rival"]))
            .person(PersonSpec::new("pal"))
            .person(PersonSpec::new("rival"))
            .person(PersonSpec::new("other"))
            .build()
            .unwrap();
        let model = PainModel::default();

        place(&mut group, "target", "a");
        assert_eq!(pain_of(&model, &group, "target"), 0);
        place(&mut group, "pal", "a");
        assert_eq!(pain_of(&model, &group, "target"), -1);
        place(&mut group, "rival", "a");
        assert_eq!(pain_of(&model, &group, "target"), 9);
        place(&mut group, "other", "a");
        assert_eq!(pain_of(&model, &group, "target"), 8);
        // target's lists cost nobody else anything
        assert_eq!(pain_of(&model, &group, "rival"), 0);
        assert_eq!(pain_of(&model, &group, "pal"), 0);
    }

    #[test]
    fn test_one_way_foe_hurts_only_the_one_who_lists() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 2))
            .person(PersonSpec::new("jane").foes(["bob"]))
            .person(PersonSpec::new("bob"))
            .build()
            .unwrap();
        let model = PainModel::default();
        let jane = group.roster().find_person("jane").unwrap();
        let a = TeamId::new(0);

        place(&mut group, "bob", "a");
        assert_eq!(model.person_pain(&group, jane, a), 10);
        assert_eq!(pain_of(&model, &group, "bob"), 0);

        place(&mut group, "jane", "a");
        assert_eq!(pain_of(&model, &group, "jane"), 10);
        assert_eq!(pain_of(&model, &group, "bob"), 0);
        assert_eq!(model.pain_index(&group), PainIndex::new(10, 1, 5.0));
    }

    #[test]
    fn test_trait_pain_is_shared_by_members() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 3).quota("leader", 1).quota("sound", 2))
            .person(PersonSpec::new("m1"))
            .person(PersonSpec::new("m2"))
            .build()
            .unwrap();
        place(&mut group, "m1", "a");
        place(&mut group, "m2", "a");

        let model = PainModel::default();
        let a = TeamId::new(0);
        assert_eq!(model.trait_pain(&group, a), 9);
        assert_eq!(model.team_pains(&group, a), vec![9, 9]);
        assert_eq!(model.team_max_pain(&group, a), 9);
        assert_eq!(model.team_mean_pain(&group, a), 9.0);
    }

    #[test]
    fn test_custom_weights() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 2).quota("leader", 1))
            .person(PersonSpec::new("x"))
            .person(PersonSpec::new("y").foes(["x"]))
            .build()
            .unwrap();
        place(&mut group, "x", "a");
        place(&mut group, "y", "a");

        let model = PainModel::new(PainWeights {
            foe_penalty: 100,
            friend_weight: -5,
            trait_weight: 7,
        });
        assert_eq!(pain_of(&model, &group, "x"), 7);
        assert_eq!(pain_of(&model, &group, "y"), 107);
    }

    #[test]
    fn test_empty_team_sentinel() {
        let group = RosterBuilder::new()
            .team(TeamSpec::new("a", 2))
            .build()
            .unwrap();
        let model = PainModel::default();
        assert_eq!(model.team_max_pain(&group, TeamId::new(0)), EMPTY_TEAM_PAIN);
        assert_eq!(
            model.team_mean_pain(&group, TeamId::new(0)),
            EMPTY_TEAM_PAIN as f64
        );
        assert_eq!(model.pain_index(&group), PainIndex::UNSCORED);
    }

    #[test]
    fn test_unassigned_people_count_as_unranked() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("a", 1))
            .person(PersonSpec::new("x").prefers(["a"]))
            .person(PersonSpec::new("y").prefers(["a"]))
            .build()
            .unwrap();
        place(&mut group, "x", "a");
        let model = PainModel::default();
        assert_eq!(model.pains(&group), vec![0, 1]);
        assert_eq!(model.pain_index(&group), PainIndex::new(1, 1, 0.5));
    }

    #[test]
    fn test_pain_index_ordering() {
        let a = PainIndex::new(3, 2, 1.5);
        let b = PainIndex::new(3, 2, 1.75);
        let c = PainIndex::new(3, 3, 0.0);
        let d = PainIndex::new(4, 1, 0.0);

        assert!(a < b && b < c && c < d);
        assert!(a < d);
        assert!(d < PainIndex::UNSCORED);
        assert!(PainIndex::new(1000, 1000, 1000.0) < PainIndex::UNSCORED);

        for x in [a, b, c, d, PainIndex::UNSCORED] {
            assert!(!(x < x));
            assert_eq!(x, x);
        }
    }

    #[test]
    fn test_pain_index_display() {
        assert_eq!(PainIndex::new(4, 2, 1.0 / 3.0).to_string(), "4,2,0.33");
        assert_eq!(PainIndex::UNSCORED.to_string(), "unscored");
    }

    #[test]
    fn test_from_pains() {
        assert_eq!(PainIndex::from_pains(&[]), PainIndex::UNSCORED);
        assert_eq!(
            PainIndex::from_pains(&[1, 5, 5, -1]),
            PainIndex::new(5, 2, 2.5)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_weights_serde() {
        let weights = PainWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let back: PainWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, back);
    }
}
