//! Shared utilities for Pulse.

pub mod counters;
pub mod logging;
pub mod time;

pub use counters::ActionCounters;
pub use logging::{init_tracing, LogFormat};
pub use time::format_duration;
