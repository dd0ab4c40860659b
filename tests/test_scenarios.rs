mod common;

use common::members_of;
use teampref::{
    options::PoolOptions,
    pain::{PainIndex, PainModel},
    pool::StrainPool,
    rng::RandomNumberGenerator,
    roster::{PersonSpec, RosterBuilder, TeamSpec},
    search::LocalSearchEngine,
    stop::StopToken,
    TeamGroup,
};

fn solve(base: &TeamGroup, rounds: u64) -> StrainPool {
    let options = PoolOptions::builder()
        .strain_count(4)
        .generations_per_round(100)
        .seed(2024)
        .build();
    let mut pool = StrainPool::new(base, PainModel::default(), options).unwrap();
    assert_eq!(pool.run_rounds(rounds, &StopToken::new()).unwrap(), rounds);
    pool
}

#[test]
fn test_everyone_gets_their_first_choice() {
    let base = RosterBuilder::new()
        .team(TeamSpec::new("A", 1))
        .team(TeamSpec::new("B", 1))
        .person(PersonSpec::new("x").prefers(["B"]))
        .person(PersonSpec::new("y").prefers(["A"]))
        .build()
        .unwrap();

    let pool = solve(&base, 2);
    let best = pool.best();
    assert_eq!(best.pain(), PainIndex::new(0, 2, 0.0));
    assert_eq!(members_of(best.group(), "a"), vec!["y"]);
    assert_eq!(members_of(best.group(), "b"), vec!["x"]);
}

#[test]
fn test_foes_are_split_when_an_alternative_is_as_good() {
    let base = RosterBuilder::new()
        .team(TeamSpec::new("A", 2))
        .team(TeamSpec::new("B", 2))
        .person(PersonSpec::new("p").foes(["q"]))
        .person(PersonSpec::new("q").foes(["p"]))
        .build()
        .unwrap();

    let pool = solve(&base, 2);
    let best = pool.best();
    assert_eq!(best.pain(), PainIndex::new(0, 2, 0.0));
    let roster = best.group().roster();
    let p = roster.find_person("p").unwrap();
    let q = roster.find_person("q").unwrap();
    assert_ne!(best.group().team_of(p), best.group().team_of(q));
}

#[test]
fn test_foes_competing_for_one_team() {
    let base = RosterBuilder::new()
        .team(TeamSpec::new("A", 2))
        .team(TeamSpec::new("B", 2))
        .person(PersonSpec::new("p").prefers(["A"]).foes(["q"]))
        .person(PersonSpec::new("q").prefers(["A"]).foes(["p"]))
        .build()
        .unwrap();

    let pool = solve(&base, 3);
    assert_eq!(pool.best().pain(), PainIndex::new(1, 1, 0.5));
    assert_eq!(members_of(pool.best().group(), "a").len(), 1);
}

#[test]
fn test_closing_a_trait_quota_relieves_the_whole_team() {
    let base = RosterBuilder::new()
        .team(TeamSpec::new("A", 3).quota("Leader", 1))
        .team(TeamSpec::new("B", 3))
        .person(PersonSpec::new("m1").on_team("A"))
        .person(PersonSpec::new("m2").on_team("A"))
        .person(PersonSpec::new("boss").prefers(["B", "A"]).traits(["Leader"]))
        .build()
        .unwrap();
    let model = PainModel::default();
    let a = base.roster().find_team("a").unwrap();
    let m1 = base.roster().find_person("m1").unwrap();
    assert_eq!(model.person_pain(&base, m1, a), 3);

    let pool = solve(&base, 3);
    let best = pool.best();
    // boss takes rank 1 so that neither m1 nor m2 sits at pain 3
    assert_eq!(members_of(best.group(), "a"), vec!["boss", "m1", "m2"]);
    assert_eq!(model.person_pain(best.group(), m1, a), 0);
    assert_eq!(best.pain(), PainIndex::new(1, 1, 1.0 / 3.0));
}

#[test]
fn test_ceiling_evicts_everyone_at_the_worst_pain() {
    let mut group = RosterBuilder::new()
        .team(TeamSpec::new("A", 4))
        .team(TeamSpec::new("B", 2))
        .team(TeamSpec::new("C", 2))
        .person(PersonSpec::new("fine").prefers(["A"]))
        .person(PersonSpec::new("worst1").prefers(["B", "C", "A"]))
        .person(PersonSpec::new("worst2").prefers(["C", "B", "A"]))
        .person(PersonSpec::new("meh").prefers(["B", "A"]))
        .build()
        .unwrap();
    let roster = group.roster().clone();
    let a = roster.find_team("a").unwrap();
    for person in roster.people() {
        assert!(group.assign(person.id(), a));
    }

    let model = PainModel::default();
    let engine = LocalSearchEngine::new(model, &PoolOptions::default());
    let max = model.pain_index(&group).max_pain();
    let mut rng = RandomNumberGenerator::from_seed(0);

    assert_eq!(engine.destroy(&mut group, 0.0, max - 1, &mut rng), 2);
    let mut evicted: Vec<&str> = group
        .unassigned()
        .iter()
        .map(|&p| roster.person(p).name())
        .collect();
    evicted.sort();
    assert_eq!(evicted, vec!["worst1", "worst2"]);
    group.sanity_check().unwrap();
}
