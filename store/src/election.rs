//! Election storage trait.

use pulse_types::{AccountId, GlobalState, UserStats};

/// Read/write access to per-user stats and the global election state.
///
/// Writes are infallible: a handler computes the complete new value first and
/// stores it only after every precondition has passed.
pub trait ElectionStore {
    /// Stats for a participant, or `None` if they have never acted.
    fn user(&self, id: &AccountId) -> Option<&UserStats>;

    /// Insert or replace a participant's stats.
    fn put_user(&mut self, id: &AccountId, stats: UserStats);

    /// Number of participants with stored stats.
    fn user_count(&self) -> usize;

    /// Every stored participant, ordered by identity.
    fn iter_users(&self) -> Vec<(AccountId, UserStats)>;

    fn global(&self) -> &GlobalState;

    fn global_mut(&mut self) -> &mut GlobalState;

    /// Stats for a participant, defaulting to zero values.
    fn user_or_default(&self, id: &AccountId) -> UserStats {
        self.user(id).cloned().unwrap_or_default()
    }
}
