use thiserror::Error;

use crate::phase::Phase;
use crate::player::PlayerId;

/// Contract violations raised by [`MatchController`](crate::MatchController).
///
/// Every variant means the host called an operation it was not allowed to
/// call. The controller returns the error before touching any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CtfError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player already joined: {0}")]
    PlayerExists(PlayerId),

    #[error("{operation} is not allowed during {phase}")]
    WrongPhase { operation: &'static str, phase: Phase },

    #[error("{operation} requires a running match")]
    NotRunning { operation: &'static str },

    #[error("Player has no team: {0}")]
    NoTeam(PlayerId),

    #[error("Player is already online: {0}")]
    AlreadyOnline(PlayerId),

    #[error("Player is not online: {0}")]
    NotOnline(PlayerId),

    #[error("Match is over")]
    MatchOver,
}

impl CtfError {
    /// All controller errors are host contract breaches. Hosts that prefer to
    /// crash on them can check this instead of matching variants.
    pub fn is_host_bug(&self) -> bool {
        match self {
            CtfError::UnknownPlayer(_)
            | CtfError::PlayerExists(_)
            | CtfError::WrongPhase { .. }
            | CtfError::NotRunning { .. }
            | CtfError::NoTeam(_)
            | CtfError::AlreadyOnline(_)
            | CtfError::NotOnline(_)
            | CtfError::MatchOver => true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CtfError>;
