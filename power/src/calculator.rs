//! Pure power computation from stored stats.

use pulse_types::{ElectionParams, UserStats};
use serde::{Deserialize, Serialize};

/// Power every participant has before any engagement.
pub const BASE_POWER: u64 = 1;

/// The components that add up to a participant's voting power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub base: u64,
    pub xp_bonus: u64,
    pub streak_bonus: u64,
}

impl PowerBreakdown {
    pub fn total(&self) -> u64 {
        self.base + self.xp_bonus + self.streak_bonus
    }
}

/// Maps stats to voting power under a fixed parameter set.
///
/// Holds no state besides the parameters; every method is side-effect free.
#[derive(Clone, Debug, Default)]
pub struct PowerCalculator {
    params: ElectionParams,
}

impl PowerCalculator {
    pub fn new(params: ElectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ElectionParams {
        &self.params
    }

    /// Voting power for a participant's current stats.
    pub fn voting_power(&self, stats: &UserStats) -> u64 {
        self.breakdown(stats).total()
    }

    pub fn breakdown(&self, stats: &UserStats) -> PowerBreakdown {
        PowerBreakdown {
            base: BASE_POWER,
            xp_bonus: self.xp_bonus(stats.xp),
            streak_bonus: self.streak_bonus(stats.consecutive_engage_days),
        }
    }

    /// One point per full XP tier, capped.
    pub fn xp_bonus(&self, xp: u64) -> u64 {
        xp.checked_div(self.params.xp_per_tier)
            .unwrap_or(0)
            .min(self.params.max_xp_tiers)
    }

    /// Zero below the streak threshold; from there one point plus one per
    /// further step, capped.
    pub fn streak_bonus(&self, streak_days: u32) -> u64 {
        let threshold = self.params.streak_threshold_days;
        if streak_days < threshold {
            return 0;
        }
        let steps = (streak_days - threshold)
            .checked_div(self.params.streak_step_days)
            .unwrap_or(0);
        (1 + u64::from(steps)).min(self.params.max_streak_bonus)
    }

    /// The ceiling no participant can exceed.
    pub fn max_power(&self) -> u64 {
        BASE_POWER + self.params.max_xp_tiers + self.params.max_streak_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(xp: u64, streak: u32) -> UserStats {
        UserStats {
            xp,
            consecutive_engage_days: streak,
            ..Default::default()
        }
    }

    fn calc() -> PowerCalculator {
        PowerCalculator::default()
    }

    #[test]
    fn fresh_participant_has_base_power() {
        assert_eq!(calc().voting_power(&UserStats::default()), 1);
    }

    #[test]
    fn xp_bonus_counts_full_tiers() {
        let c = calc();
        assert_eq!(c.xp_bonus(0), 0);
        assert_eq!(c.xp_bonus(99), 0);
        assert_eq!(c.xp_bonus(100), 1);
        assert_eq!(c.xp_bonus(950), 9);
    }

    #[test]
    fn xp_bonus_is_capped() {
        let c = calc();
        assert_eq!(c.xp_bonus(1_000), 10);
        assert_eq!(c.xp_bonus(1_200), 10);
        assert_eq!(c.xp_bonus(u64::MAX), 10);
    }

    #[test]
    fn streak_bonus_steps_weekly() {
        let c = calc();
        assert_eq!(c.streak_bonus(0), 0);
        assert_eq!(c.streak_bonus(6), 0);
        assert_eq!(c.streak_bonus(7), 1);
        assert_eq!(c.streak_bonus(13), 1);
        assert_eq!(c.streak_bonus(14), 2);
        assert_eq!(c.streak_bonus(21), 3);
    }

    #[test]
    fn streak_bonus_is_capped() {
        let c = calc();
        assert_eq!(c.streak_bonus(28), 3);
        assert_eq!(c.streak_bonus(100), 3);
        assert_eq!(c.streak_bonus(u32::MAX), 3);
    }

    #[test]
    fn maximum_power_is_fourteen() {
        let c = calc();
        assert_eq!(c.voting_power(&stats(5_000, 365)), 14);
        assert_eq!(c.max_power(), 14);
    }

    #[test]
    fn breakdown_sums_to_power() {
        let b = calc().breakdown(&stats(250, 14));
        assert_eq!(
            b,
            PowerBreakdown {
                base: 1,
                xp_bonus: 2,
                streak_bonus: 2
            }
        );
        assert_eq!(b.total(), 5);
    }
}
