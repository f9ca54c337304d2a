//! Per-participant engagement and voting stats.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Everything the election remembers about one participant.
///
/// Created with zero values the first time a participant successfully
/// engages or votes, and never deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Experience points. Only engagement raises them; nothing lowers them.
    pub xp: u64,
    /// Unclaimed reward units. Zeroed by a claim.
    pub reward_balance: u64,
    pub last_engage_at: Option<Timestamp>,
    pub last_vote_at: Option<Timestamp>,
    /// Consecutive engagement days.
    pub consecutive_engage_days: u32,
    pub votes_cast: u64,
}
