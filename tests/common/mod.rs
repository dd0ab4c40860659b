#![allow(dead_code)]

use teampref::rng::RandomNumberGenerator;
use teampref::roster::{PersonSpec, RosterBuilder, TeamSpec};
use teampref::TeamGroup;

/// Shape of a generated roster.
#[derive(Debug, Clone, Copy)]
pub struct Synthetic {
    pub teams: usize,
    pub min_size: i64,
    pub max_size: i64,
    pub people: usize,
    pub prefs: usize,
    pub friends: usize,
    pub foes: usize,
}

impl Default for Synthetic {
    fn default() -> Self {
        Self {
            teams: 15,
            min_size: 4,
            max_size: 8,
            people: 70,
            prefs: 3,
            friends: 4,
            foes: 2,
        }
    }
}

/// Random teams that each want a leader, a sound person and an artist, and
/// random people with preferences, friends, foes and traits.
pub fn synthetic_roster(shape: Synthetic, seed: u64) -> TeamGroup {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let mut builder = RosterBuilder::new();

    let team_names: Vec<String> = (0..shape.teams).map(|i| format!("team{}", i)).collect();
    for name in &team_names {
        builder.add_team(
            TeamSpec::new(name.as_str(), rng.gen_range(shape.min_size..=shape.max_size))
                .quota("leader", 1)
                .quota("sound", 1)
                .quota("art", 1),
        );
    }

    let person_names: Vec<String> = (0..shape.people).map(|i| format!("person{}", i)).collect();
    for (i, name) in person_names.iter().enumerate() {
        let mut prefs = team_names.clone();
        rng.shuffle(&mut prefs);
        prefs.truncate(shape.prefs);

        let mut friends = Vec::new();
        while friends.len() < shape.friends {
            let other = rng.gen_range(0..shape.people);
            if other != i {
                friends.push(person_names[other].clone());
            }
        }
        let mut foes = Vec::new();
        while foes.len() < shape.foes {
            let other = rng.gen_range(0..shape.people);
            if other != i && !friends.contains(&person_names[other]) {
                foes.push(person_names[other].clone());
            }
        }

        let mut traits = Vec::new();
        for (label, percent) in [("leader", 30.0), ("art", 30.0), ("sound", 8.0), ("bonzai", 10.0)] {
            if rng.chance(percent) {
                traits.push(label);
            }
        }

        builder.add_person(
            PersonSpec::new(name.as_str())
                .prefers(prefs)
                .friends(friends)
                .foes(foes)
                .traits(traits),
        );
    }

    builder.build().expect("synthetic roster is valid")
}

/// Names of the people on `team`, sorted.
pub fn members_of(group: &TeamGroup, team: &str) -> Vec<String> {
    let roster = group.roster();
    let id = roster.find_team(team).expect("team exists");
    let mut names: Vec<String> = group
        .team(id)
        .members()
        .iter()
        .map(|&p| roster.person(p).name().to_string())
        .collect();
    names.sort();
    names
}
