//! Thread-safe handle that serializes every action against one election.

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::event::{ElectionEvent, EventBus};
use pulse_power::PowerBreakdown;
use pulse_store::{ElectionStore, MemoryStore};
use pulse_types::{AccountId, Choice, ElectionParams, ParamsError, Tally, Timestamp, UserStats};
use pulse_utils::{format_duration, ActionCounters};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

const ACTIONS: &[&str] = &[
    "claim_ownership",
    "start_election",
    "end_election",
    "reset_all",
    "engage",
    "vote",
    "claim_rewards",
    "rejected",
];

/// A cloneable, `Send + Sync` handle to one election.
///
/// Each action runs start to finish under a single lock, so concurrent
/// callers observe actions as if they ran one after another. Successful
/// events are published to the [`EventBus`] before the lock is released,
/// preserving mutation order.
pub struct SharedElection<S = MemoryStore> {
    engine: Arc<Mutex<ElectionEngine<S>>>,
    bus: Arc<EventBus>,
    counters: Arc<ActionCounters>,
}

impl<S> Clone for SharedElection<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            bus: Arc::clone(&self.bus),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl SharedElection<MemoryStore> {
    /// A fresh in-memory election with no listeners, from a configured
    /// parameter set.
    pub fn in_memory(params: ElectionParams) -> Result<Self, ParamsError> {
        ElectionEngine::with_params(params).map(Self::new)
    }
}

impl<S: ElectionStore> SharedElection<S> {
    pub fn new(engine: ElectionEngine<S>) -> Self {
        Self::with_event_bus(engine, EventBus::new())
    }

    pub fn with_event_bus(engine: ElectionEngine<S>, bus: EventBus) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            bus: Arc::new(bus),
            counters: Arc::new(ActionCounters::new(ACTIONS)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ElectionEngine<S>> {
        // Handlers validate before writing, so a panic elsewhere cannot leave
        // the engine half-updated.
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one action atomically, then publish and count its outcome.
    fn transact<F>(&self, action: &'static str, apply: F) -> Result<ElectionEvent, ElectionError>
    where
        F: FnOnce(&mut ElectionEngine<S>) -> Result<ElectionEvent, ElectionError>,
    {
        let mut engine = self.lock();
        match apply(&mut *engine) {
            Ok(event) => {
                debug!(action, actor = %event.actor(), event = event.name(), "accepted");
                self.counters.increment(action);
                self.bus.emit(&event);
                Ok(event)
            }
            Err(err) => {
                self.counters.increment("rejected");
                match &err {
                    ElectionError::CooldownActive {
                        action: gated,
                        remaining_secs,
                    } => debug!(
                        action,
                        "{gated} rejected, retry in {}",
                        format_duration(*remaining_secs)
                    ),
                    ElectionError::Unauthorized | ElectionError::Overflow(_) => {
                        warn!(action, kind = err.kind(), "{err}")
                    }
                    _ => debug!(action, kind = err.kind(), "{err}"),
                }
                Err(err)
            }
        }
    }

    pub fn claim_ownership(&self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        self.transact("claim_ownership", |e| e.claim_ownership(caller))
    }

    pub fn start_election(&self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        self.transact("start_election", |e| e.start_election(caller))
    }

    pub fn end_election(&self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        self.transact("end_election", |e| e.end_election(caller))
    }

    pub fn reset_all(&self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        self.transact("reset_all", |e| e.reset_all(caller))
    }

    pub fn engage(
        &self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.transact("engage", |e| e.engage(caller, now))
    }

    pub fn cast_vote(
        &self,
        caller: &AccountId,
        choice: Choice,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.transact("vote", |e| e.cast_vote(caller, choice, now))
    }

    pub fn vote_a(
        &self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::A, now)
    }

    pub fn vote_b(
        &self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::B, now)
    }

    pub fn vote_c(
        &self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::C, now)
    }

    pub fn claim_rewards(&self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        self.transact("claim_rewards", |e| e.claim_rewards(caller))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Run a read-only closure against a consistent view of the election.
    pub fn read<R>(&self, f: impl FnOnce(&ElectionEngine<S>) -> R) -> R {
        f(&*self.lock())
    }

    pub fn stats_of(&self, id: &AccountId) -> UserStats {
        self.read(|e| e.stats_of(id))
    }

    pub fn xp(&self, id: &AccountId) -> u64 {
        self.read(|e| e.xp(id))
    }

    pub fn reward_balance(&self, id: &AccountId) -> u64 {
        self.read(|e| e.reward_balance(id))
    }

    pub fn voting_power_of(&self, id: &AccountId) -> u64 {
        self.read(|e| e.voting_power_of(id))
    }

    pub fn power_breakdown_of(&self, id: &AccountId) -> PowerBreakdown {
        self.read(|e| e.power_breakdown_of(id))
    }

    pub fn owner(&self) -> Option<AccountId> {
        self.read(|e| e.owner().cloned())
    }

    pub fn election_active(&self) -> bool {
        self.read(|e| e.election_active())
    }

    pub fn tally(&self) -> Tally {
        self.read(|e| e.tally())
    }

    pub fn votes_a(&self) -> u64 {
        self.read(|e| e.votes_a())
    }

    pub fn votes_b(&self) -> u64 {
        self.read(|e| e.votes_b())
    }

    pub fn votes_c(&self) -> u64 {
        self.read(|e| e.votes_c())
    }

    pub fn total_votes(&self) -> u64 {
        self.read(|e| e.total_votes())
    }

    pub fn leading_choice(&self) -> (Choice, u64) {
        self.read(|e| e.leading_choice())
    }

    pub fn participants(&self) -> Vec<(AccountId, UserStats)> {
        self.read(|e| e.participants())
    }

    /// Accepted actions by name, plus the `rejected` total.
    pub fn action_counts(&self) -> BTreeMap<&'static str, u64> {
        self.counters.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CooldownAction;
    use std::sync::{Barrier, Mutex as StdMutex};
    use std::thread;

    fn id(name: &str) -> AccountId {
        AccountId::new(name)
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedElection>();
    }

    #[test]
    fn bus_receives_only_successful_events() {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| {
            sink.lock().unwrap().push(event.name());
        });
        let election = SharedElection::with_event_bus(ElectionEngine::new(), bus);

        election.claim_ownership(&id("admin")).unwrap();
        assert!(election.claim_ownership(&id("bob")).is_err());
        election.start_election(&id("admin")).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["ownership_claimed", "election_started"]
        );
        let counts = election.action_counts();
        assert_eq!(counts["claim_ownership"], 1);
        assert_eq!(counts["rejected"], 1);
    }

    #[test]
    fn concurrent_votes_are_serialized() {
        let election = SharedElection::new(ElectionEngine::new());
        election.claim_ownership(&id("admin")).unwrap();
        election.start_election(&id("admin")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let election = election.clone();
                thread::spawn(move || {
                    let voter = id(&format!("voter-{t}"));
                    let mut cast = 0u64;
                    let mut now = Timestamp::new(0);
                    for round in 0..25u64 {
                        let choice = Choice::ALL[(t + round as usize) % 3];
                        if let Ok(ElectionEvent::Voted { power, .. }) =
                            election.cast_vote(&voter, choice, now)
                        {
                            cast += power;
                        }
                        now = now.plus(300);
                    }
                    cast
                })
            })
            .collect();

        let emitted: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(emitted, 8 * 25);
        assert_eq!(election.total_votes(), emitted);
        assert_eq!(election.action_counts()["vote"], 200);
    }

    /// Racing callers for one identity at the same instant: the first
    /// through the lock wins and the rest see its cooldown.
    fn race_one_identity<F>(
        election: &SharedElection,
        threads: usize,
        act: F,
    ) -> Vec<Result<ElectionEvent, ElectionError>>
    where
        F: Fn(&SharedElection) -> Result<ElectionEvent, ElectionError>
            + Send
            + Copy
            + 'static,
    {
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let election = election.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    act(&election)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    }

    #[test]
    fn same_identity_votes_are_serialized() {
        let election = SharedElection::new(ElectionEngine::new());
        election.claim_ownership(&id("admin")).unwrap();
        election.start_election(&id("admin")).unwrap();
        let power = election.voting_power_of(&id("alice"));

        let results = race_one_identity(&election, 8, |e| {
            e.vote_a(&id("alice"), Timestamp::new(1_000))
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
            r,
            Err(ElectionError::CooldownActive {
                action: CooldownAction::Vote,
                remaining_secs: 300,
            })
        )));
        assert_eq!(election.stats_of(&id("alice")).votes_cast, 1);
        assert_eq!(election.votes_a(), power);
        assert_eq!(election.action_counts()["rejected"], 7);
    }

    #[test]
    fn same_identity_engagements_are_serialized() {
        let election = SharedElection::new(ElectionEngine::new());

        let results = race_one_identity(&election, 8, |e| {
            e.engage(&id("alice"), Timestamp::new(1_000))
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
            r,
            Err(ElectionError::CooldownActive {
                action: CooldownAction::Engage,
                ..
            })
        )));
        let stats = election.stats_of(&id("alice"));
        assert_eq!(stats.xp, 10);
        assert_eq!(stats.reward_balance, 1);
        assert_eq!(stats.consecutive_engage_days, 1);
    }

    #[test]
    fn clones_share_state() {
        let a = SharedElection::in_memory(ElectionParams::default()).unwrap();
        let b = a.clone();
        a.engage(&id("alice"), Timestamp::new(0)).unwrap();
        assert_eq!(b.xp(&id("alice")), 10);
        assert_eq!(b.owner(), None);
    }
}
