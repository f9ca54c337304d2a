//! Action handlers: the election state machine.

use crate::error::{CooldownAction, ElectionError};
use crate::event::ElectionEvent;
use pulse_power::{PowerBreakdown, PowerCalculator};
use pulse_store::{ElectionStore, MemoryStore};
use pulse_types::{AccountId, Choice, ElectionParams, ParamsError, Tally, Timestamp, UserStats};
use tracing::debug;

/// Owns the election state and applies actions to it.
///
/// Every handler checks all of its preconditions against a copy of the
/// affected state and writes back only once the whole action has succeeded.
pub struct ElectionEngine<S = MemoryStore> {
    store: S,
    power: PowerCalculator,
}

impl ElectionEngine<MemoryStore> {
    /// A fresh in-memory election.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            power: PowerCalculator::default(),
        }
    }

    /// A fresh in-memory election from a configured parameter set, which must
    /// restate the rules exactly.
    pub fn with_params(params: ElectionParams) -> Result<Self, ParamsError> {
        Self::with_store(MemoryStore::new(), params)
    }
}

impl Default for ElectionEngine<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ElectionStore> ElectionEngine<S> {
    pub fn with_store(store: S, params: ElectionParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            store,
            power: PowerCalculator::new(params),
        })
    }

    pub fn params(&self) -> &ElectionParams {
        self.power.params()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Ownership & lifecycle ─────────────────────────────────────────────

    /// Become the owner. Only the first claim succeeds.
    pub fn claim_ownership(&mut self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        ensure_valid(caller)?;
        let global = self.store.global_mut();
        if global.owner.is_some() {
            return Err(ElectionError::AlreadyClaimed);
        }
        global.owner = Some(caller.clone());
        debug!(owner = %caller, "ownership claimed");
        Ok(ElectionEvent::OwnershipClaimed {
            owner: caller.clone(),
        })
    }

    /// Open voting. Owner only.
    pub fn start_election(&mut self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        let global = self.store.global_mut();
        if !global.is_owner(caller) {
            return Err(ElectionError::Unauthorized);
        }
        if global.election_active {
            return Err(ElectionError::AlreadyActive);
        }
        global.election_active = true;
        debug!(by = %caller, "election started");
        Ok(ElectionEvent::ElectionStarted { by: caller.clone() })
    }

    /// Close voting. Owner only. Tallies are kept.
    pub fn end_election(&mut self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        let global = self.store.global_mut();
        if !global.is_owner(caller) {
            return Err(ElectionError::Unauthorized);
        }
        if !global.election_active {
            return Err(ElectionError::NotActive);
        }
        global.election_active = false;
        debug!(by = %caller, total = global.tally.total(), "election ended");
        Ok(ElectionEvent::ElectionEnded {
            by: caller.clone(),
            tally: global.tally,
        })
    }

    /// Zero all three tallies. Owner only; user stats and the election flag
    /// are left alone.
    pub fn reset_all(&mut self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        let global = self.store.global_mut();
        if !global.is_owner(caller) {
            return Err(ElectionError::Unauthorized);
        }
        let previous_total = global.tally.total();
        global.tally.reset();
        debug!(by = %caller, previous_total, "tallies reset");
        Ok(ElectionEvent::TalliesReset {
            by: caller.clone(),
            previous_total,
        })
    }

    // ── Engagement ────────────────────────────────────────────────────────

    /// Earn XP and a reward unit, and advance the daily streak.
    ///
    /// Allowed regardless of election state, at most once per engage cooldown.
    pub fn engage(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        ensure_valid(caller)?;
        let params = self.power.params();
        let mut stats = self.store.user_or_default(caller);

        if let Some(last) = stats.last_engage_at {
            if !last.has_expired(params.engage_cooldown_secs, now) {
                return Err(ElectionError::CooldownActive {
                    action: CooldownAction::Engage,
                    remaining_secs: last.remaining(params.engage_cooldown_secs, now),
                });
            }
        }

        // The streak looks at the previous engagement, so it goes first.
        stats.consecutive_engage_days = next_streak(&stats, params, now)?;
        stats.xp = stats
            .xp
            .checked_add(params.xp_per_engage)
            .ok_or(ElectionError::Overflow("xp"))?;
        stats.reward_balance = stats
            .reward_balance
            .checked_add(params.engage_reward)
            .ok_or(ElectionError::Overflow("reward balance"))?;
        stats.last_engage_at = Some(now);

        let event = ElectionEvent::Engaged {
            account: caller.clone(),
            xp_gained: params.xp_per_engage,
            total_xp: stats.xp,
            streak: stats.consecutive_engage_days,
        };
        debug!(
            account = %caller,
            total_xp = stats.xp,
            streak = stats.consecutive_engage_days,
            "engaged"
        );
        self.store.put_user(caller, stats);
        Ok(event)
    }

    // ── Voting ────────────────────────────────────────────────────────────

    pub fn vote_a(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::A, now)
    }

    pub fn vote_b(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::B, now)
    }

    pub fn vote_c(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        self.cast_vote(caller, Choice::C, now)
    }

    /// Add the caller's current voting power to `choice`.
    ///
    /// Power is read from the caller's stats at call time.
    pub fn cast_vote(
        &mut self,
        caller: &AccountId,
        choice: Choice,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        ensure_valid(caller)?;
        if !self.store.global().election_active {
            return Err(ElectionError::ElectionNotActive);
        }

        let params = self.power.params();
        let mut stats = self.store.user_or_default(caller);
        if let Some(last) = stats.last_vote_at {
            if !last.has_expired(params.vote_cooldown_secs, now) {
                return Err(ElectionError::CooldownActive {
                    action: CooldownAction::Vote,
                    remaining_secs: last.remaining(params.vote_cooldown_secs, now),
                });
            }
        }

        let power = self.power.voting_power(&stats);
        let mut tally = self.store.global().tally;
        tally
            .checked_add(choice, power)
            .ok_or(ElectionError::Overflow("tally"))?;
        stats.reward_balance = stats
            .reward_balance
            .checked_add(params.vote_reward)
            .ok_or(ElectionError::Overflow("reward balance"))?;
        stats.votes_cast = stats
            .votes_cast
            .checked_add(1)
            .ok_or(ElectionError::Overflow("votes cast"))?;
        stats.last_vote_at = Some(now);

        let event = ElectionEvent::Voted {
            account: caller.clone(),
            choice,
            power,
            total_votes_by_user: stats.votes_cast,
        };
        debug!(account = %caller, %choice, power, "vote cast");
        self.store.global_mut().tally = tally;
        self.store.put_user(caller, stats);
        Ok(event)
    }

    // ── Rewards ───────────────────────────────────────────────────────────

    /// Zero the caller's reward balance and report how much it held.
    ///
    /// This is ledger bookkeeping only; nothing is transferred anywhere.
    pub fn claim_rewards(&mut self, caller: &AccountId) -> Result<ElectionEvent, ElectionError> {
        let mut stats = match self.store.user(caller) {
            Some(stats) if stats.reward_balance > 0 => stats.clone(),
            _ => return Err(ElectionError::NoRewards),
        };
        let amount = std::mem::take(&mut stats.reward_balance);
        debug!(account = %caller, amount, "rewards claimed");
        self.store.put_user(caller, stats);
        Ok(ElectionEvent::RewardClaimed {
            account: caller.clone(),
            amount,
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Stats for a participant; zero values if they have never acted.
    pub fn stats_of(&self, id: &AccountId) -> UserStats {
        self.store.user_or_default(id)
    }

    pub fn xp(&self, id: &AccountId) -> u64 {
        self.store.user(id).map_or(0, |s| s.xp)
    }

    pub fn reward_balance(&self, id: &AccountId) -> u64 {
        self.store.user(id).map_or(0, |s| s.reward_balance)
    }

    /// The weight the participant's next vote would carry.
    pub fn voting_power_of(&self, id: &AccountId) -> u64 {
        self.power.voting_power(&self.stats_of(id))
    }

    pub fn power_breakdown_of(&self, id: &AccountId) -> PowerBreakdown {
        self.power.breakdown(&self.stats_of(id))
    }

    pub fn owner(&self) -> Option<&AccountId> {
        self.store.global().owner.as_ref()
    }

    pub fn election_active(&self) -> bool {
        self.store.global().election_active
    }

    pub fn tally(&self) -> Tally {
        self.store.global().tally
    }

    pub fn votes_for(&self, choice: Choice) -> u64 {
        self.tally().get(choice)
    }

    pub fn votes_a(&self) -> u64 {
        self.votes_for(Choice::A)
    }

    pub fn votes_b(&self) -> u64 {
        self.votes_for(Choice::B)
    }

    pub fn votes_c(&self) -> u64 {
        self.votes_for(Choice::C)
    }

    /// Sum of the three tallies.
    pub fn total_votes(&self) -> u64 {
        self.tally().total()
    }

    /// The leading choice; ties go to A, then B.
    pub fn leading_choice(&self) -> (Choice, u64) {
        self.tally().leader()
    }

    pub fn participant_count(&self) -> usize {
        self.store.user_count()
    }

    /// Every participant with recorded stats, ordered by identity.
    pub fn participants(&self) -> Vec<(AccountId, UserStats)> {
        self.store.iter_users()
    }
}

fn ensure_valid(caller: &AccountId) -> Result<(), ElectionError> {
    if caller.is_valid() {
        Ok(())
    } else {
        Err(ElectionError::InvalidAccount)
    }
}

/// Streak after an engagement at `now`, judged against the previous one.
///
/// A first-ever engagement takes the extend branch, so the streak goes 0 → 1.
fn next_streak(
    stats: &UserStats,
    params: &ElectionParams,
    now: Timestamp,
) -> Result<u32, ElectionError> {
    let window = params.streak_window_secs;
    let extended = || {
        stats
            .consecutive_engage_days
            .checked_add(1)
            .ok_or(ElectionError::Overflow("streak"))
    };
    match stats.last_engage_at {
        None => extended(),
        Some(last) if last.has_expired(window.saturating_mul(2), now) => Ok(1),
        Some(last) if last.has_expired(window, now) => extended(),
        Some(_) => Ok(stats.consecutive_engage_days),
    }
}
