//! Fundamental types for Pulse.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! participant identities, timestamps, vote choices, per-user stats, global
//! election state, and the rule parameters that drive engagement and voting.

pub mod account;
pub mod choice;
pub mod params;
pub mod state;
pub mod stats;
pub mod time;

pub use account::AccountId;
pub use choice::Choice;
pub use params::{ElectionParams, ParamsError};
pub use state::{GlobalState, Tally};
pub use stats::UserStats;
pub use time::{Clock, SystemClock, Timestamp};
