//! Replays the bundled example script end to end.

use pulse_daemon::{replay, DaemonConfig, ParticipantSummary};
use pulse_election::SharedElection;
use pulse_nullables::NullClock;
use pulse_types::{AccountId, Choice, Tally};

const SCRIPT: &str = include_str!("../scripts/basic_election.jsonl");

#[test]
fn bundled_script_produces_expected_tallies() {
    let config = DaemonConfig::default();
    let election = SharedElection::in_memory(config.params).expect("default rules");
    let mut out = Vec::new();

    let summary = replay(&election, &NullClock::new(0), SCRIPT.as_bytes(), &mut out).unwrap();

    // alice votes with power 1, then 2 once her streak reaches 7 days.
    // bob's second vote lands inside the cooldown.
    assert_eq!(summary.tally, Tally::new(3, 1, 0));
    assert_eq!((summary.leader, summary.leader_votes), (Choice::A, 3));
    assert_eq!(summary.owner, Some(AccountId::new("owner")));
    assert!(!summary.election_active);
    // bob's early re-vote, mallory's reset and bob's post-election vote.
    assert_eq!(summary.rejected, 3);
    assert_eq!(summary.applied, 15);

    // Only callers whose actions touched their stats are listed.
    assert_eq!(
        summary.participants,
        vec![
            ParticipantSummary {
                account: AccountId::new("alice"),
                xp: 70,
                reward_balance: 0,
                streak: 7,
                votes_cast: 2,
                voting_power: 2,
            },
            ParticipantSummary {
                account: AccountId::new("bob"),
                xp: 10,
                reward_balance: 6,
                streak: 1,
                votes_cast: 1,
                voting_power: 1,
            },
        ]
    );

    let output = String::from_utf8(out).unwrap();
    let last: serde_json::Value = serde_json::from_str(output.lines().last().unwrap()).unwrap();
    assert_eq!(last["ok"]["event"], "reward_claimed");
    // 7 engagements + 2 votes
    assert_eq!(last["ok"]["amount"], 7 + 2 * 5);

    let counts = election.action_counts();
    assert_eq!(counts["engage"], 8);
    assert_eq!(counts["vote"], 3);
}
