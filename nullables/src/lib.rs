//! Nullable infrastructure for deterministic testing.
//!
//! The election core takes time as an argument. Tests and replays that need a
//! moving clock use these controllable stand-ins instead of the system clock.

pub mod clock;

pub use clock::NullClock;
