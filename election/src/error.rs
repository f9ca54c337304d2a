use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which cooldown-gated action was attempted too soon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownAction {
    Engage,
    Vote,
}

impl fmt::Display for CooldownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engage => f.write_str("engage"),
            Self::Vote => f.write_str("vote"),
        }
    }
}

/// Why an action was rejected. A rejected action mutates nothing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ElectionError {
    #[error("caller identity must not be blank")]
    InvalidAccount,

    #[error("ownership has already been claimed")]
    AlreadyClaimed,

    #[error("caller is not the election owner")]
    Unauthorized,

    #[error("election is already active")]
    AlreadyActive,

    #[error("election is not active")]
    NotActive,

    #[error("voting is closed: no election is active")]
    ElectionNotActive,

    #[error("{action} cooldown active: {remaining_secs}s remaining")]
    CooldownActive {
        action: CooldownAction,
        remaining_secs: u64,
    },

    #[error("no rewards to claim")]
    NoRewards,

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl ElectionError {
    /// Whether the same call can succeed later without any other action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CooldownActive { .. })
    }

    /// Stable snake_case name, used in logs and replay output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAccount => "invalid_account",
            Self::AlreadyClaimed => "already_claimed",
            Self::Unauthorized => "unauthorized",
            Self::AlreadyActive => "already_active",
            Self::NotActive => "not_active",
            Self::ElectionNotActive => "election_not_active",
            Self::CooldownActive { .. } => "cooldown_active",
            Self::NoRewards => "no_rewards",
            Self::Overflow(_) => "overflow",
        }
    }
}
