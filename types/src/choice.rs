//! The three fixed ballot choices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ballot choice. The candidate set is fixed.
///
/// Declaration order is the tie-break order: A beats B and C, B beats C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
}

impl Choice {
    /// All choices in tie-break order.
    pub const ALL: [Choice; 3] = [Choice::A, Choice::B, Choice::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
