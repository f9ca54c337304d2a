//! Notification records returned by successful actions.

use pulse_types::{AccountId, Choice, Tally};
use serde::{Deserialize, Serialize};

/// What a successful action did. Every state-changing call yields exactly one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ElectionEvent {
    OwnershipClaimed {
        owner: AccountId,
    },
    ElectionStarted {
        by: AccountId,
    },
    /// Carries the tallies as they stood when voting closed.
    ElectionEnded {
        by: AccountId,
        tally: Tally,
    },
    Engaged {
        account: AccountId,
        xp_gained: u64,
        total_xp: u64,
        streak: u32,
    },
    Voted {
        account: AccountId,
        choice: Choice,
        power: u64,
        total_votes_by_user: u64,
    },
    RewardClaimed {
        account: AccountId,
        amount: u64,
    },
    TalliesReset {
        by: AccountId,
        previous_total: u64,
    },
}

impl ElectionEvent {
    /// Stable snake_case name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OwnershipClaimed { .. } => "ownership_claimed",
            Self::ElectionStarted { .. } => "election_started",
            Self::ElectionEnded { .. } => "election_ended",
            Self::Engaged { .. } => "engaged",
            Self::Voted { .. } => "voted",
            Self::RewardClaimed { .. } => "reward_claimed",
            Self::TalliesReset { .. } => "tallies_reset",
        }
    }

    /// The identity that performed the action.
    pub fn actor(&self) -> &AccountId {
        match self {
            Self::OwnershipClaimed { owner } => owner,
            Self::ElectionStarted { by }
            | Self::ElectionEnded { by, .. }
            | Self::TalliesReset { by, .. } => by,
            Self::Engaged { account, .. }
            | Self::Voted { account, .. }
            | Self::RewardClaimed { account, .. } => account,
        }
    }
}

type Listener = Box<dyn Fn(&ElectionEvent) + Send + Sync>;

/// Listeners registered before the election is shared.
///
/// [`SharedElection`](crate::SharedElection) calls [`EventBus::emit`] while it
/// still holds the engine lock, so each listener sees events in exactly the
/// order the state changed. A listener that calls back into the same election
/// deadlocks.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it runs after every later successful action.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&ElectionEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver `event` to each listener in registration order.
    pub fn emit(&self, event: &ElectionEvent) {
        self.listeners.iter().for_each(|listener| listener(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn every_listener_sees_every_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |event| {
                seen.lock().unwrap().push((tag, event.name()));
            });
        }

        bus.emit(&ElectionEvent::OwnershipClaimed {
            owner: AccountId::new("alice"),
        });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", "ownership_claimed"), ("second", "ownership_claimed")]
        );
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let event = ElectionEvent::Voted {
            account: AccountId::new("bob"),
            choice: Choice::B,
            power: 3,
            total_votes_by_user: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "voted");
        assert_eq!(json["account"], "bob");
        assert_eq!(json["choice"], "B");
        assert_eq!(json["power"], 3);
        assert_eq!(event.actor().as_str(), "bob");
    }
}
