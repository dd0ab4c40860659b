//! # Error Types
//!
//! This module defines the error type shared by the roster builder, the
//! loaders and the search. Configuration problems are reported before any
//! optimization starts; `Invariant` signals a bookkeeping defect found by a
//! consistency check and is always fatal.
//!
//! Running out of room while placing a person is *not* an error: the person
//! stays in the unassigned pool and the search carries on.
//!
//! ## Examples
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use teampref::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_teams(path: &str) -> Result<File> {
//!     File::open(path).context(format!("Failed to read file {}", path))
//! }
//!
//! assert!(open_teams("/definitely/not/here.csv").is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Errors raised while building rosters, loading files, or searching.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Invalid team definition or search options.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Team '{0}' is defined more than once")]
    DuplicateTeam(String),

    #[error("Person '{0}' is defined more than once")]
    DuplicatePerson(String),

    /// A preference or initial placement names a team that doesn't exist.
    #[error("'{owner}' refers to team '{team}', but that team doesn't exist")]
    UnknownTeam { owner: String, team: String },

    /// A friend or foe entry names a person that doesn't exist.
    #[error("'{owner}' lists '{person}' as a friend or foe, but that person doesn't exist")]
    UnknownPerson { owner: String, person: String },

    /// Initial placements put more people on a team than it can hold.
    #[error("Cannot place '{person}' on team '{team}': all {capacity} seats are taken")]
    OverCapacity {
        team: String,
        person: String,
        capacity: usize,
    },

    /// Team membership or trait bookkeeping drifted from the actual members.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for roster and search operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Extension trait for Result to add context to errors.
///
/// Converts any standard error into [`RosterError::Other`] prefixed with the
/// given context.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| RosterError::Other(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_context_wraps_message() {
        let failed: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = failed.context("Failed to read file teams.csv").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read file teams.csv: gone");
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(RosterError::Io(_))));
    }
}
