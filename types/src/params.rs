//! Rule parameters for engagement, voting, and power calculation.
//!
//! The defaults are the rules. Grouping them here lets tests and the daemon's
//! TOML configuration name each constant instead of repeating literals, but a
//! set that differs from the rules in any field is rejected by
//! [`ElectionParams::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

const HOUR_SECS: u64 = 3600;
const DAY_SECS: u64 = 24 * HOUR_SECS;

/// A parameter set that departs from the election rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{field} is fixed at {expected}, got {found}")]
    FixedRule {
        field: &'static str,
        expected: u64,
        found: u64,
    },
}

/// Every constant the election rules depend on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectionParams {
    // ── Cooldowns ─────────────────────────────────────────────────────────
    /// Minimum gap between two engagements by the same participant.
    pub engage_cooldown_secs: u64,

    /// Minimum gap between two votes by the same participant.
    pub vote_cooldown_secs: u64,

    /// Length of one streak day. Engaging again after one window extends the
    /// streak; after two windows the streak restarts.
    pub streak_window_secs: u64,

    // ── Accrual ───────────────────────────────────────────────────────────
    pub xp_per_engage: u64,
    pub engage_reward: u64,
    pub vote_reward: u64,

    // ── Power ─────────────────────────────────────────────────────────────
    /// XP needed per extra point of voting power.
    pub xp_per_tier: u64,

    /// Cap on XP-derived power.
    pub max_xp_tiers: u64,

    /// Streak length at which the first bonus point is granted.
    pub streak_threshold_days: u32,

    /// Additional streak days per further bonus point.
    pub streak_step_days: u32,

    /// Cap on the streak bonus.
    pub max_streak_bonus: u64,
}

impl ElectionParams {
    pub fn pulse_defaults() -> Self {
        Self {
            engage_cooldown_secs: HOUR_SECS,
            vote_cooldown_secs: 5 * 60,
            streak_window_secs: DAY_SECS,

            xp_per_engage: 10,
            engage_reward: 1,
            vote_reward: 5,

            xp_per_tier: 100,
            max_xp_tiers: 10,
            streak_threshold_days: 7,
            streak_step_days: 7,
            max_streak_bonus: 3,
        }
    }

    /// Every field paired with its name, for validation and diagnostics.
    fn fields(&self) -> [(&'static str, u64); 11] {
        [
            ("engage_cooldown_secs", self.engage_cooldown_secs),
            ("vote_cooldown_secs", self.vote_cooldown_secs),
            ("streak_window_secs", self.streak_window_secs),
            ("xp_per_engage", self.xp_per_engage),
            ("engage_reward", self.engage_reward),
            ("vote_reward", self.vote_reward),
            ("xp_per_tier", self.xp_per_tier),
            ("max_xp_tiers", self.max_xp_tiers),
            ("streak_threshold_days", u64::from(self.streak_threshold_days)),
            ("streak_step_days", u64::from(self.streak_step_days)),
            ("max_streak_bonus", self.max_streak_bonus),
        ]
    }

    /// Reject any set that differs from [`ElectionParams::pulse_defaults`].
    ///
    /// Cooldowns, accrual and the power curve are the rules of the election;
    /// a configuration may restate them but not change them.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let rules = Self::pulse_defaults().fields();
        for ((field, expected), (_, found)) in rules.into_iter().zip(self.fields()) {
            if found != expected {
                return Err(ParamsError::FixedRule {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self::pulse_defaults()
    }
}
