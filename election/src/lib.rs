//! Engagement-gated weighted voting.
//!
//! Participants engage to earn XP and build a daily streak; both raise the
//! weight of their votes for one of three fixed choices. The first claimant
//! owns the election and alone may open, close, or reset it.
//!
//! Every action validates all of its preconditions before touching state, so
//! a rejected action never leaves a partial mutation behind. Time is always an
//! explicit argument: the engine never reads a clock.

pub mod engine;
pub mod error;
pub mod event;
pub mod shared;

pub use engine::ElectionEngine;
pub use error::{CooldownAction, ElectionError};
pub use event::{ElectionEvent, EventBus};
pub use shared::SharedElection;
