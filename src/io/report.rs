//! Plain-text summary of a solved group, one block per team.

use std::fmt;

use crate::group::TeamGroup;
use crate::pain::PainModel;

/// Renders a [`TeamGroup`] for people to read.
///
/// ```text
/// Team: 'red' (capacity 3, size 2, painMax 1, painAvg 0.50, missingTraits 0):
/// Trait 'leader': team has 1, team needs 1, shortfall 0
/// ann (pain 0, rank 0, 1/1 friends, 0/0 foes, traits [leader])
/// bob (pain 1, rank -, 0/0 friends, 0/1 foes, traits [])
/// ```
pub struct Report<'a> {
    group: &'a TeamGroup,
    model: &'a PainModel,
}

impl<'a> Report<'a> {
    pub fn new(group: &'a TeamGroup, model: &'a PainModel) -> Self {
        Self { group, model }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = self.group;
        let roster = group.roster();

        for team in group.teams() {
            let def = roster.team(team.id());
            writeln!(
                f,
                "Team: '{}' (capacity {}, size {}, painMax {}, painAvg {:.2}, missingTraits {}):",
                def.name(),
                team.capacity(),
                team.len(),
                self.model.team_max_pain(group, team.id()),
                self.model.team_mean_pain(group, team.id()),
                group.unfilled_trait_count(team.id())
            )?;

            for &(trait_id, needs) in def.quotas() {
                let has = team.trait_count(trait_id);
                writeln!(
                    f,
                    "Trait '{}': team has {}, team needs {}, shortfall {}",
                    roster.trait_name(trait_id),
                    has,
                    needs,
                    i64::from(needs) - i64::from(has)
                )?;
            }

            let mut members: Vec<_> = team.members().iter().map(|&p| roster.person(p)).collect();
            members.sort_by(|a, b| a.name().cmp(b.name()));
            for person in members {
                let rank = person
                    .rank_of(team.id())
                    .map_or_else(|| "-".to_string(), |r| r.to_string());
                let friends = person.friends().iter().filter(|&&p| team.contains(p)).count();
                let foes = person.foes().iter().filter(|&&p| team.contains(p)).count();
                let traits: Vec<&str> = person
                    .traits()
                    .iter()
                    .map(|&t| roster.trait_name(t))
                    .collect();
                writeln!(
                    f,
                    "{} (pain {}, rank {}, {}/{} friends, {}/{} foes, traits [{}])",
                    person.name(),
                    self.model.person_pain(group, person.id(), team.id()),
                    rank,
                    friends,
                    person.friends().len(),
                    foes,
                    person.foes().len(),
                    traits.join(", ")
                )?;
            }
            writeln!(f)?;
        }

        let mut unassigned: Vec<&str> = group
            .unassigned()
            .iter()
            .map(|&p| roster.person(p).name())
            .collect();
        unassigned.sort_unstable();
        writeln!(f, "Unassigned ({}): {}", unassigned.len(), unassigned.join(", "))?;
        write!(f, "Pain index: {}", self.model.pain_index(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{PersonSpec, RosterBuilder, TeamSpec};

    #[test]
    fn test_report_layout() {
        let mut group = RosterBuilder::new()
            .team(TeamSpec::new("Red", 3).quota("leader", 1))
            .team(TeamSpec::new("Blue", 1))
            .person(PersonSpec::new("Bob").foes(["ann"]))
            .person(PersonSpec::new("Ann").prefers(["red"]).friends(["bob"]).traits(["leader"]))
            .person(PersonSpec::new("Cy").prefers(["blue"]))
            .build()
            .unwrap();
        let roster = group.roster().clone();
        let red = roster.find_team("red").unwrap();
        assert!(group.assign(roster.find_person("ann").unwrap(), red));
        assert!(group.assign(roster.find_person("bob").unwrap(), red));

        let model = PainModel::default();
        let text = Report::new(&group, &model).to_string();
        let expected = "\
Team: 'red' (capacity 3, size 2, painMax 10, painAvg 4.50, missingTraits 0):
Trait 'leader': team has 1, team needs 1, shortfall 0
ann (pain -1, rank 0, 1/1 friends, 0/0 foes, traits [leader])
bob (pain 10, rank -, 0/0 friends, 1/1 foes, traits [])

Team: 'blue' (capacity 1, size 0, painMax -1000, painAvg -1000.00, missingTraits 0):

Unassigned (1): cy
Pain index: 10,1,3.33";
        assert_eq!(text, expected);
    }
}
