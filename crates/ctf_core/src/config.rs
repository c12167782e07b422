//! Match configuration
//!
//! Loaded from a JSON file; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::phase::Phase;

/// Currency amounts handed out through the host's reward hooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub kill: i32,
    pub death: i32,
    pub assist: i32,
    pub capture: i32,
    pub win: i32,
    pub lose: i32,
    pub draw: i32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            kill: 10,
            death: -5,
            assist: 5,
            capture: 50,
            win: 30,
            lose: 10,
            draw: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Phase durations (seconds) ===
    /// Lobby countdown once enough players are online
    pub wait_time: u32,
    pub prep_time: u32,
    pub combat_time: u32,
    pub sudden_death_time: u32,
    /// Time between match end and teardown
    pub shutdown_time: u32,

    // === Rules ===
    pub min_players_to_start: u32,
    /// Abort when a phase ends without enough players
    pub abort_on_insufficient_players: bool,
    /// Balance teams by online players instead of everyone ever assigned
    pub balance_by_online_count: bool,
    /// Whether items drop on death during sudden death
    pub sudden_death_allows_drops: bool,

    pub rewards: RewardConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            wait_time: 61,
            prep_time: 60 * 5,
            combat_time: 60 * 15,
            sudden_death_time: 60 * 5,
            shutdown_time: 30,

            min_players_to_start: 2,
            abort_on_insufficient_players: true,
            balance_by_online_count: true,
            sudden_death_allows_drops: true,

            rewards: RewardConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Read config from `path`, or defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("wait_time", self.wait_time),
            ("prep_time", self.prep_time),
            ("combat_time", self.combat_time),
            ("sudden_death_time", self.sudden_death_time),
            ("shutdown_time", self.shutdown_time),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Invalid(format!("{} must be at least 1 second", name)));
        }
        if self.min_players_to_start < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_players_to_start must be at least 2, got {}",
                self.min_players_to_start
            )));
        }
        Ok(())
    }

    /// Countdown length for `phase`
    pub fn phase_duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Lobby => self.wait_time,
            Phase::Preparation => self.prep_time,
            Phase::Combat => self.combat_time,
            Phase::SuddenDeath => self.sudden_death_time,
            Phase::Ended => self.shutdown_time,
        }
    }
}
