//! # CSV tables
//!
//! The teams file has the columns `Team Name, Capacity, Traits`, where the
//! traits cell is a comma-separated list of `label count` pairs:
//!
//! ```text
//! Team Name,Capacity,Traits
//! Red,4,"leader 1, art 2"
//! Blue,3,
//! ```
//!
//! The people file has the columns
//! `Name, Team Name, Team preferences, Friends, Foes, Traits`. A non-empty team
//! pins the person there; the four list cells are comma-separated. The first
//! row of each file is a header and is skipped.
//!
//! [`write_people`] produces the people format for a solved group, so the
//! output of one run can be fed back in as the input of the next.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{info, warn};

use crate::error::{Result, ResultExt, RosterError};
use crate::group::TeamGroup;
use crate::roster::{PersonSpec, RosterBuilder, TeamSpec};

const PEOPLE_HEADER: [&str; 6] = [
    "Name",
    "Team Name",
    "Team preferences",
    "Friends",
    "Foes",
    "Traits",
];

/// Splits a list cell on `sep`, trimming every entry and dropping empty ones.
///
/// ```rust
/// use teampref::io::split_list;
///
/// assert_eq!(split_list(" red, blue ,,", ','), vec!["red", "blue"]);
/// assert!(split_list("", ',').is_empty());
/// ```
pub fn split_list(cell: &str, sep: char) -> Vec<String> {
    cell.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn parse_quotas(team: &str, cell: &str) -> Result<Vec<(String, i64)>> {
    split_list(cell, ',')
        .into_iter()
        .map(|entry| {
            let tokens: Vec<&str> = entry.split_whitespace().collect();
            let count = match tokens.as_slice() {
                [_, count] => count.parse::<i64>().ok(),
                _ => None,
            };
            match count {
                Some(count) => Ok((tokens[0].to_string(), count)),
                None => Err(RosterError::Configuration(format!(
                    "For team '{}', expected a quantity after the trait: '{}'",
                    team, entry
                ))),
            }
        })
        .collect()
}

/// Reads team definitions. Rows with fewer than two cells are skipped.
///
/// # Errors
///
/// Returns an error on malformed CSV, a capacity that isn't an integer, or a
/// trait quota without a count.
pub fn read_teams<R: Read>(input: R) -> Result<Vec<TeamSpec>> {
    let mut teams = Vec::new();
    for (line, record) in reader(input).records().enumerate() {
        let record = record?;
        if record.len() < 2 || cell(&record, 0).is_empty() {
            warn!(row = line + 2, "team row must have a name and a capacity, skipping");
            continue;
        }

        let name = cell(&record, 0);
        let capacity = cell(&record, 1).parse::<i64>().map_err(|_| {
            RosterError::Configuration(format!(
                "Team '{}' has an invalid capacity '{}'",
                name,
                cell(&record, 1)
            ))
        })?;
        let mut spec = TeamSpec::new(name, capacity);
        for (label, count) in parse_quotas(name, cell(&record, 2))? {
            spec = spec.quota(label, count);
        }
        teams.push(spec);
    }
    Ok(teams)
}

/// Reads people. Rows without a name are skipped; missing list cells count
/// as empty lists.
///
/// # Errors
///
/// Returns an error on malformed CSV.
pub fn read_people<R: Read>(input: R) -> Result<Vec<PersonSpec>> {
    let mut people = Vec::new();
    for (line, record) in reader(input).records().enumerate() {
        let record = record?;
        let name = cell(&record, 0);
        if name.is_empty() {
            warn!(row = line + 2, "person row must have a name, skipping");
            continue;
        }

        let mut spec = PersonSpec::new(name)
            .prefers(split_list(cell(&record, 2), ','))
            .friends(split_list(cell(&record, 3), ','))
            .foes(split_list(cell(&record, 4), ','))
            .traits(split_list(cell(&record, 5), ','));
        let team = cell(&record, 1);
        if !team.is_empty() {
            spec = spec.on_team(team);
        }
        people.push(spec);
    }
    Ok(people)
}

/// Builds a group from in-memory teams and people tables.
pub fn read_roster<T: Read, P: Read>(teams: T, people: P) -> Result<TeamGroup> {
    let mut builder = RosterBuilder::new();
    for team in read_teams(teams)? {
        builder.add_team(team);
    }
    for person in read_people(people)? {
        builder.add_person(person);
    }
    builder.build()
}

/// Loads the teams and people files and builds the starting group.
pub fn load_roster(teams_path: impl AsRef<Path>, people_path: impl AsRef<Path>) -> Result<TeamGroup> {
    let teams_path = teams_path.as_ref();
    let people_path = people_path.as_ref();
    let teams = File::open(teams_path)
        .context(format!("Failed to read file {}", teams_path.display()))?;
    let people = File::open(people_path)
        .context(format!("Failed to read file {}", people_path.display()))?;

    let group = read_roster(teams, people)?;
    info!(
        teams = group.teams().len(),
        people = group.roster().population(),
        pinned = group.assigned_count(),
        "roster loaded"
    );
    Ok(group)
}

/// Writes the team definitions in the teams format.
pub fn write_teams<W: Write>(group: &TeamGroup, output: W) -> Result<()> {
    let roster = group.roster();
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record(["Team Name", "Capacity", "Traits"])?;
    for def in roster.teams() {
        let quotas: Vec<String> = def
            .quotas()
            .iter()
            .map(|&(t, count)| format!("{} {}", roster.trait_name(t), count))
            .collect();
        writer.write_record([
            def.name(),
            def.capacity().to_string().as_str(),
            quotas.join(", ").as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every person in the people format: team members team by team, then
/// the unassigned pool with an empty team cell.
pub fn write_people<W: Write>(group: &TeamGroup, output: W) -> Result<()> {
    let roster = group.roster();
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record(PEOPLE_HEADER)?;

    let rows = group
        .teams()
        .iter()
        .flat_map(|team| {
            team.members()
                .iter()
                .map(move |&p| (p, roster.team(team.id()).name()))
        })
        .chain(group.unassigned().iter().map(|&p| (p, "")));

    for (id, team) in rows {
        let person = roster.person(id);
        let prefs: Vec<&str> = person
            .preferences()
            .iter()
            .map(|&t| roster.team(t).name())
            .collect();
        let friends: Vec<&str> = person
            .friends()
            .iter()
            .map(|&p| roster.person(p).name())
            .collect();
        let foes: Vec<&str> = person
            .foes()
            .iter()
            .map(|&p| roster.person(p).name())
            .collect();
        let traits: Vec<&str> = person
            .traits()
            .iter()
            .map(|&t| roster.trait_name(t))
            .collect();

        writer.write_record([
            person.name(),
            team,
            prefs.join(",").as_str(),
            friends.join(",").as_str(),
            foes.join(",").as_str(),
            traits.join(",").as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the people dump to `path`, replacing any existing file.
pub fn write_people_file(group: &TeamGroup, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).context(format!("Failed to write file {}", path.display()))?;
    write_people(group, file)?;
    info!(path = %path.display(), "people written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS: &str = "Team Name,Capacity,Traits\n\
                         Red,3,\"leader 1, art 2\"\n\
                         Blue,2,\n\
                         lonely\n";

    const PEOPLE: &str = "Name,Team Name,Team preferences,Friends,Foes,Traits\n\
                          Ann,,\"blue, red\",bob,,leader\n\
                          Bob,Red,red,,ann,\"art, leader\"\n\
                          ,,,,,\n\
                          Cy\n";

    #[test]
    fn test_read_teams_parses_quotas_and_skips_short_rows() {
        let teams = read_teams(TEAMS.as_bytes()).unwrap();
        assert_eq!(
            teams,
            vec![
                TeamSpec::new("Red", 3).quota("leader", 1).quota("art", 2),
                TeamSpec::new("Blue", 2),
            ]
        );
    }

    #[test]
    fn test_read_teams_rejects_quota_without_count() {
        let input = "Team Name,Capacity,Traits\nRed,3,leader\n";
        match read_teams(input.as_bytes()) {
            Err(RosterError::Configuration(msg)) => assert!(msg.contains("expected a quantity")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_teams_rejects_bad_capacity() {
        let input = "Team Name,Capacity\nRed,lots\n";
        assert!(matches!(
            read_teams(input.as_bytes()),
            Err(RosterError::Configuration(_))
        ));
    }

    #[test]
    fn test_read_people() {
        let people = read_people(PEOPLE.as_bytes()).unwrap();
        assert_eq!(
            people,
            vec![
                PersonSpec::new("Ann")
                    .prefers(["blue", "red"])
                    .friends(["bob"])
                    .traits(["leader"]),
                PersonSpec::new("Bob")
                    .on_team("Red")
                    .prefers(["red"])
                    .foes(["ann"])
                    .traits(["art", "leader"]),
                PersonSpec::new("Cy"),
            ]
        );
    }

    #[test]
    fn test_read_roster_pins_people_with_a_team() {
        let group = read_roster(TEAMS.as_bytes(), PEOPLE.as_bytes()).unwrap();
        let roster = group.roster();
        let bob = roster.find_person("bob").unwrap();
        assert_eq!(group.team_of(bob), roster.find_team("red"));
        assert_eq!(group.unassigned().len(), 2);
    }

    #[test]
    fn test_write_people_layout() {
        let group = read_roster(TEAMS.as_bytes(), PEOPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_people(&group, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Name,Team Name,Team preferences,Friends,Foes,Traits\n\
             bob,red,red,,ann,\"art,leader\"\n\
             ann,,\"blue,red\",bob,,leader\n\
             cy,,,,,\n"
        );
    }

    #[test]
    fn test_write_teams_layout() {
        let group = read_roster(TEAMS.as_bytes(), PEOPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_teams(&group, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Team Name,Capacity,Traits\n\
             red,3,\"leader 1, art 2\"\n\
             blue,2,\n"
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_roster("/no/such/teams.csv", "/no/such/people.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to read file /no/such/teams.csv"));
    }
}
