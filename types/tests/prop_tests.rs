use proptest::prelude::*;

use pulse_types::{Choice, Tally, Timestamp};

proptest! {
    /// The leader always holds the maximum count, and no earlier choice ties it.
    #[test]
    fn leader_is_first_maximum(a in 0u64..1_000, b in 0u64..1_000, c in 0u64..1_000) {
        let tally = Tally::new(a, b, c);
        let (choice, count) = tally.leader();
        prop_assert_eq!(count, a.max(b).max(c));
        for earlier in Choice::ALL.iter().take_while(|ch| **ch != choice) {
            prop_assert!(tally.get(*earlier) < count);
        }
    }

    /// Total is the sum of the entries.
    #[test]
    fn total_is_sum(a in 0u64..1_000_000, b in 0u64..1_000_000, c in 0u64..1_000_000) {
        prop_assert_eq!(Tally::new(a, b, c).total(), a + b + c);
    }

    /// A timestamp has expired exactly when `remaining` reaches zero.
    #[test]
    fn expiry_agrees_with_remaining(start in 0u64..1_000_000, window in 1u64..100_000, now in 0u64..2_000_000) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(now);
        prop_assert_eq!(t.has_expired(window, now), t.remaining(window, now) == 0);
    }
}
