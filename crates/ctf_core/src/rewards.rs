//! Match settlement and currency hooks
//!
//! The core only computes who gets what. Crediting balances and storing
//! statistics is up to the host.

use serde::{Deserialize, Serialize};

use crate::config::RewardConfig;
use crate::host::MatchHost;
use crate::player::{PlayerId, PlayerRecord};
use crate::rules::Outcome;
use crate::team::Team;
use crate::MatchController;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    pub fn for_team(team: Team, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Draw => MatchResult::Draw,
            Outcome::Winner(winner) if winner == team => MatchResult::Win,
            Outcome::Winner(_) => MatchResult::Loss,
        }
    }
}

/// In-match events that pay out through the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardEvent {
    Kill,
    Death,
    Assist,
    Capture,
}

impl RewardConfig {
    pub fn amount(&self, event: RewardEvent) -> i32 {
        match event {
            RewardEvent::Kill => self.kill,
            RewardEvent::Death => self.death,
            RewardEvent::Assist => self.assist,
            RewardEvent::Capture => self.capture,
        }
    }

    pub fn for_result(&self, result: MatchResult) -> i32 {
        match result {
            MatchResult::Win => self.win,
            MatchResult::Loss => self.lose,
            MatchResult::Draw => self.draw,
        }
    }
}

/// End-of-match payout for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub player: PlayerId,
    pub team: Team,
    pub result: MatchResult,
    pub coins: i32,
}

/// Settle every player that was on a team.
pub fn settle<'a, I: 'a>(
    players: impl IntoIterator<Item = &'a PlayerRecord<I>>,
    outcome: Outcome,
    rewards: &RewardConfig,
) -> Vec<Settlement> {
    players
        .into_iter()
        .filter_map(|record| {
            let team = record.team()?;
            let result = MatchResult::for_team(team, outcome);
            Some(Settlement {
                player: record.id(),
                team,
                result,
                coins: rewards.for_result(result),
            })
        })
        .collect()
}

impl<H: MatchHost, R: Rng> MatchController<H, R> {
    /// Payouts for a match that ended normally. `None` while running or
    /// after an abort.
    pub fn settle(&self) -> Option<Vec<Settlement>> {
        let outcome = self.outcome()?;
        Some(settle(self.players(), outcome, &self.config().rewards))
    }
}

/// Long-lived per-user statistics kept by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub coins: u32,
}

impl PlayerStats {
    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Kills per death; with no deaths this is the kill count.
    pub fn kd_ratio(&self) -> f64 {
        if self.deaths == 0 {
            f64::from(self.kills)
        } else {
            f64::from(self.kills) / f64::from(self.deaths)
        }
    }

    pub fn wl_ratio(&self) -> f64 {
        if self.losses == 0 {
            f64::from(self.wins)
        } else {
            f64::from(self.wins) / f64::from(self.losses)
        }
    }

    /// Add (or take) coins, never going below zero. Returns the actual change.
    pub fn award(&mut self, amount: i32) -> i32 {
        let old = i64::from(self.coins);
        let new = (old + i64::from(amount)).clamp(0, i64::from(u32::MAX));
        self.coins = new as u32;
        (new - old) as i32
    }
}
