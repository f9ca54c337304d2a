//! Pulse daemon: the invocation layer around the election core.
//!
//! Loads a TOML configuration, then replays JSON-lines action scripts through
//! a [`pulse_election::SharedElection`], sourcing caller identity and time from
//! each script line.

pub mod config;
pub mod error;
pub mod replay;

pub use config::DaemonConfig;
pub use error::DaemonError;
pub use replay::{replay, ParticipantSummary, ReplaySummary, ScriptAction, ScriptLine};
