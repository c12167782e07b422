use serde::{Deserialize, Serialize};
use std::fmt;

/// Match lifecycle stage.
///
/// Ordered: a match only ever moves to a later variant. `Ended` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Phase {
    /// Waiting for players; no teams yet
    #[default]
    Lobby,
    /// Teams assigned, bases being built, no PvP
    Preparation,
    /// PvP enabled, flags can be captured
    Combat,
    /// Permadeath; first flag touch wins
    SuddenDeath,
    Ended,
}

impl Phase {
    /// Is a match in progress (teams assigned and not yet over)?
    pub fn is_running(self) -> bool {
        !matches!(self, Phase::Lobby | Phase::Ended)
    }

    pub fn is_pvp(self) -> bool {
        matches!(self, Phase::Combat | Phase::SuddenDeath)
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Ended
    }

    /// Heading shown next to the countdown
    pub fn label(self) -> &'static str {
        match self {
            Phase::Lobby => "Lobby",
            Phase::Preparation => "Preparation Phase",
            Phase::Combat => "Combat Phase",
            Phase::SuddenDeath => "Sudden Death",
            Phase::Ended => "Game Over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Phase::Lobby => "Lobby",
            Phase::Preparation => "Preparation",
            Phase::Combat => "Combat",
            Phase::SuddenDeath => "SuddenDeath",
            Phase::Ended => "Ended",
        };
        f.write_str(name)
    }
}
