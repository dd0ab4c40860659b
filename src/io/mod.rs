//! Reading rosters from spreadsheets and writing results back out.
//!
//! [`tables`] handles the two CSV inputs (teams and people) and the people
//! dump; [`report`] renders a [`TeamGroup`](crate::group::TeamGroup) as
//! human-readable text.

pub mod report;
pub mod tables;

pub use report::Report;
pub use tables::{
    load_roster, read_people, read_roster, read_teams, split_list, write_people,
    write_people_file, write_teams,
};
