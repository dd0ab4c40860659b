//! Assigns people to capacity-limited teams, minimizing the worst
//! dissatisfaction ("pain") anyone ends up with.
//!
//! A [`RosterBuilder`](roster::RosterBuilder) (or the CSV loader in [`io`])
//! produces the starting [`TeamGroup`](group::TeamGroup). A
//! [`StrainPool`](pool::StrainPool) then evolves several independent copies of
//! it with a destroy-and-repair local search until a [`StopToken`](stop::StopToken)
//! is set, and reports the copy with the lowest [`PainIndex`](pain::PainIndex).

pub mod error;
pub mod group;
pub mod heuristic;
pub mod io;
pub mod options;
pub mod pain;
pub mod pool;
pub mod rng;
pub mod roster;
pub mod search;
pub mod stop;

// Re-export commonly used types for convenience
pub use error::{Result, ResultExt, RosterError};
pub use group::{Team, TeamGroup};
pub use options::PoolOptions;
pub use pain::{PainIndex, PainModel, PainWeights};
pub use pool::{RoundOutcome, RoundReport, StrainPool};
pub use roster::{PersonSpec, RosterBuilder, TeamSpec};
pub use search::Strain;
pub use stop::StopToken;
