//! Global election state: owner, lifecycle flag, and weighted tallies.

use crate::account::AccountId;
use crate::choice::Choice;
use serde::{Deserialize, Serialize};

/// Weighted vote totals per choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    a: u64,
    b: u64,
    c: u64,
}

impl Tally {
    pub fn new(a: u64, b: u64, c: u64) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, choice: Choice) -> u64 {
        match choice {
            Choice::A => self.a,
            Choice::B => self.b,
            Choice::C => self.c,
        }
    }

    fn slot_mut(&mut self, choice: Choice) -> &mut u64 {
        match choice {
            Choice::A => &mut self.a,
            Choice::B => &mut self.b,
            Choice::C => &mut self.c,
        }
    }

    /// Add weight to a choice, returning the new entry, or `None` on overflow
    /// (tally unchanged).
    pub fn checked_add(&mut self, choice: Choice, weight: u64) -> Option<u64> {
        let slot = self.slot_mut(choice);
        *slot = slot.checked_add(weight)?;
        Some(*slot)
    }

    /// Sum of all three entries.
    pub fn total(&self) -> u64 {
        self.a.saturating_add(self.b).saturating_add(self.c)
    }

    /// The choice with the highest count; ties go to the earliest choice.
    pub fn leader(&self) -> (Choice, u64) {
        let mut best = (Choice::A, self.get(Choice::A));
        for choice in [Choice::B, Choice::C] {
            let count = self.get(choice);
            if count > best.1 {
                best = (choice, count);
            }
        }
        best
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State shared by every participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Set once by the first claimant; never changes afterwards.
    pub owner: Option<AccountId>,
    pub election_active: bool,
    pub tally: Tally,
}

impl GlobalState {
    /// Whether `caller` is the established owner.
    pub fn is_owner(&self, caller: &AccountId) -> bool {
        self.owner.as_ref() == Some(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_ties_resolve_in_choice_order() {
        assert_eq!(Tally::new(5, 5, 5).leader(), (Choice::A, 5));
        assert_eq!(Tally::new(0, 5, 5).leader(), (Choice::B, 5));
        assert_eq!(Tally::new(0, 0, 0).leader(), (Choice::A, 0));
        assert_eq!(Tally::new(1, 2, 3).leader(), (Choice::C, 3));
    }

    #[test]
    fn checked_add_leaves_tally_untouched_on_overflow() {
        let mut tally = Tally::new(u64::MAX, 0, 0);
        assert_eq!(tally.checked_add(Choice::A, 1), None);
        assert_eq!(tally.get(Choice::A), u64::MAX);
        assert_eq!(tally.checked_add(Choice::B, 4), Some(4));
    }

    #[test]
    fn owner_check_requires_a_claimed_owner() {
        let mut state = GlobalState::default();
        let alice = AccountId::new("alice");
        assert!(!state.is_owner(&alice));
        state.owner = Some(alice.clone());
        assert!(state.is_owner(&alice));
        assert!(!state.is_owner(&AccountId::new("bob")));
    }
}
