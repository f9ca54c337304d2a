//! Voting power: the weight applied to every cast vote.
//!
//! `power(u) = 1 + min(⌊xp / 100⌋, 10) + streak_bonus(u)` where the streak
//! bonus is 0 below a 7-day streak, then one point per further 7 days, capped
//! at 3. Power therefore always lies in `[1, 14]` with the default rules.
//!
//! Power is computed from the participant's stats at the moment of voting; it
//! is never snapshotted.

pub mod calculator;

pub use calculator::{PowerBreakdown, PowerCalculator, BASE_POWER};
