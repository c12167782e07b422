//! # ctf_core - Capture-the-Flag Match Engine
//!
//! The match state machine for a two-team capture-the-flag session hosted
//! inside a larger game server. The host forwards world events (joins,
//! flag contact, countdown expiry) to [`MatchController`], which updates
//! scores and phases and asks the host for effects through [`MatchHost`].
//!
//! ## Features
//! - Lobby, preparation, combat, sudden death and end phases
//! - Team balancing with a seedable coin flip for ties
//! - Quick-end on a two-point lead, winner-by-time tie-breaks
//! - Countdown clock, configuration and end-of-match settlement helpers

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod loadout;
pub mod phase;
pub mod player;
pub mod rewards;
pub mod rules;
pub mod team;
pub mod timefmt;

#[cfg(test)]
mod testkit;

pub use clock::{ClockTick, PhaseClock};
pub use config::{MatchConfig, RewardConfig};
pub use controller::{MatchController, INSUFFICIENT_PLAYERS};
pub use error::{ConfigError, CtfError, Result};
pub use host::MatchHost;
pub use loadout::{Loadout, LoadoutCatalog, LoadoutItem};
pub use phase::Phase;
pub use player::{PlayerId, PlayerRecord};
pub use rewards::{settle, MatchResult, PlayerStats, RewardEvent, Settlement};
pub use rules::{Outcome, Standing};
pub use team::{PerTeam, Team};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
