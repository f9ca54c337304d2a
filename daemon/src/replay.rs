//! JSON-lines action scripts.
//!
//! Each non-blank line that does not start with `#` is one action:
//!
//! ```text
//! {"caller": "alice", "action": "engage", "at": 1700000000}
//! {"caller": "alice", "action": "vote_a"}
//! ```
//!
//! `at` is optional; without it the supplied clock is sampled. Rejected
//! actions are reported and the replay continues. A line that does not parse
//! stops the replay.

use crate::DaemonError;
use pulse_election::{ElectionError, ElectionEvent, SharedElection};
use pulse_types::{AccountId, Choice, Clock, Tally, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{BufRead, Write};
use tracing::info;

/// The operations a script may invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    ClaimOwnership,
    StartElection,
    EndElection,
    ResetAll,
    Engage,
    VoteA,
    VoteB,
    VoteC,
    ClaimRewards,
}

/// One parsed script line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub caller: AccountId,
    pub action: ScriptAction,
    #[serde(default)]
    pub at: Option<Timestamp>,
}

impl ScriptLine {
    /// Apply this line to the election at time `now`.
    pub fn apply(
        &self,
        election: &SharedElection,
        now: Timestamp,
    ) -> Result<ElectionEvent, ElectionError> {
        let caller = &self.caller;
        match self.action {
            ScriptAction::ClaimOwnership => election.claim_ownership(caller),
            ScriptAction::StartElection => election.start_election(caller),
            ScriptAction::EndElection => election.end_election(caller),
            ScriptAction::ResetAll => election.reset_all(caller),
            ScriptAction::Engage => election.engage(caller, now),
            ScriptAction::VoteA => election.vote_a(caller, now),
            ScriptAction::VoteB => election.vote_b(caller, now),
            ScriptAction::VoteC => election.vote_c(caller, now),
            ScriptAction::ClaimRewards => election.claim_rewards(caller),
        }
    }
}

/// One participant's standing at the end of a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub account: AccountId,
    pub xp: u64,
    pub reward_balance: u64,
    pub streak: u32,
    pub votes_cast: u64,
    pub voting_power: u64,
}

/// Final state after a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: u64,
    pub rejected: u64,
    pub owner: Option<AccountId>,
    pub election_active: bool,
    pub tally: Tally,
    pub leader: Choice,
    pub leader_votes: u64,
    pub total_votes: u64,
    /// Ordered by identity.
    pub participants: Vec<ParticipantSummary>,
}

/// Replay a script, writing one JSON result per action to `out`.
pub fn replay<R, W>(
    election: &SharedElection,
    clock: &dyn Clock,
    input: R,
    mut out: W,
) -> Result<ReplaySummary, DaemonError>
where
    R: BufRead,
    W: Write,
{
    let mut applied = 0u64;
    let mut rejected = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed: ScriptLine =
            serde_json::from_str(trimmed).map_err(|e| DaemonError::Script {
                line: line_no,
                reason: e.to_string(),
            })?;
        if !parsed.caller.is_valid() {
            return Err(DaemonError::Script {
                line: line_no,
                reason: "caller must not be blank".into(),
            });
        }

        let now = parsed.at.unwrap_or_else(|| clock.now());
        let record = match parsed.apply(election, now) {
            Ok(event) => {
                applied += 1;
                json!({ "line": line_no, "ok": event })
            }
            Err(err) => {
                rejected += 1;
                json!({
                    "line": line_no,
                    "error": err.kind(),
                    "message": err.to_string(),
                    "retryable": err.is_retryable(),
                })
            }
        };
        writeln!(out, "{record}")?;
    }

    let participants: Vec<ParticipantSummary> = election.read(|engine| {
        engine
            .participants()
            .into_iter()
            .map(|(account, stats)| ParticipantSummary {
                voting_power: engine.voting_power_of(&account),
                account,
                xp: stats.xp,
                reward_balance: stats.reward_balance,
                streak: stats.consecutive_engage_days,
                votes_cast: stats.votes_cast,
            })
            .collect()
    });
    let (leader, leader_votes) = election.leading_choice();
    let summary = ReplaySummary {
        applied,
        rejected,
        owner: election.owner(),
        election_active: election.election_active(),
        tally: election.tally(),
        leader,
        leader_votes,
        total_votes: election.total_votes(),
        participants,
    };
    info!(
        applied,
        rejected,
        total_votes = summary.total_votes,
        participants = summary.participants.len(),
        "replay finished, {} leads with {}",
        leader,
        leader_votes
    );
    Ok(summary)
}
