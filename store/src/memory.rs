//! In-memory election store.

use crate::ElectionStore;
use pulse_types::{AccountId, GlobalState, UserStats};
use std::collections::HashMap;

/// The process-lifetime store. Nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: HashMap<AccountId, UserStats>,
    global: GlobalState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElectionStore for MemoryStore {
    fn user(&self, id: &AccountId) -> Option<&UserStats> {
        self.users.get(id)
    }

    fn put_user(&mut self, id: &AccountId, stats: UserStats) {
        self.users.insert(id.clone(), stats);
    }

    fn user_count(&self) -> usize {
        self.users.len()
    }

    fn iter_users(&self) -> Vec<(AccountId, UserStats)> {
        let mut users: Vec<_> = self
            .users
            .iter()
            .map(|(id, stats)| (id.clone(), stats.clone()))
            .collect();
        users.sort_by(|a, b| a.0.cmp(&b.0));
        users
    }

    fn global(&self) -> &GlobalState {
        &self.global
    }

    fn global_mut(&mut self) -> &mut GlobalState {
        &mut self.global
    }
}
