//! # Ids and set helpers
//!
//! Every person, team and trait label is given a dense integer id when the
//! roster is built. Membership and friend/foe relations are then plain sorted
//! id slices, so "how many of these people are on that team" is a linear merge
//! instead of a string-hash lookup.

use std::cmp::Ordering;
use std::fmt;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a position in the roster's backing vector.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position in the roster's backing vector.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id!(
    /// Id of a person, stable for the whole run.
    PersonId
);
dense_id!(
    /// Id of a team, equal to its declaration position.
    TeamId
);
dense_id!(
    /// Id of an interned trait label.
    TraitId
);

/// Normalizes a person, team or trait name: surrounding whitespace removed,
/// lowercased.
///
/// ```rust
/// use teampref::roster::ids::normalize;
///
/// assert_eq!(normalize("  Team Red "), "team red");
/// ```
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Removes duplicates while keeping the first occurrence of every item.
pub fn dedup_preserving<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Returns the ids sorted and without duplicates.
pub fn sorted_ids<T: Ord>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = ids.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Counts the elements shared by two sorted, duplicate-free slices.
pub fn intersection_len<T: Ord>(a: &[T], b: &[T]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Returns true if the two sorted, duplicate-free slices share any element.
pub fn intersects<T: Ord>(a: &[T], b: &[T]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => return true,
        }
    }
    false
}
