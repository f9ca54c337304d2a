//! State store for Pulse.
//!
//! Pure storage: no validation lives here. The election engine depends only on
//! the [`ElectionStore`] trait; [`MemoryStore`] is the in-memory backend.

pub mod election;
pub mod memory;

pub use election::ElectionStore;
pub use memory::MemoryStore;
