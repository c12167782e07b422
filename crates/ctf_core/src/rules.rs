//! Match decision rules
//!
//! Pure functions over a [`Standing`] snapshot. No IO, no randomness.
//!
//! Winner-by-time order:
//! 1. strictly higher score
//! 2. a team with online players against a team with none
//! 3. the team whose flag is not being carried (the other team is exposed)
//! 4. otherwise draw, including "both flags held" and "both flags safe"

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::phase::Phase;
use crate::player::PlayerId;
use crate::team::{PerTeam, Team};

/// Score lead that ends combat early
pub const QUICK_END_LEAD: u32 = 2;

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Team),
    Draw,
}

impl Outcome {
    pub fn from_winner(winner: Option<Team>) -> Self {
        winner.map_or(Outcome::Draw, Outcome::Winner)
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::Winner(team) => Some(team),
            Outcome::Draw => None,
        }
    }
}

/// Scoreboard state the rules need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Standing {
    pub score: PerTeam<u32>,
    pub online: PerTeam<u32>,
    /// `flag_holder[t]` is the enemy player carrying team `t`'s flag
    pub flag_holder: PerTeam<Option<PlayerId>>,
}

impl Standing {
    pub fn flag_held(&self, team: Team) -> bool {
        self.flag_holder[team].is_some()
    }

    pub fn score_lead(&self) -> u32 {
        self.score.alpha.abs_diff(self.score.beta)
    }
}

/// Winner when the clock forces a decision; `None` is a draw.
pub fn winner_by_time(standing: &Standing) -> Option<Team> {
    match standing.score.alpha.cmp(&standing.score.beta) {
        Ordering::Greater => return Some(Team::Alpha),
        Ordering::Less => return Some(Team::Beta),
        Ordering::Equal => {}
    }

    let alpha_present = standing.online.alpha > 0;
    let beta_present = standing.online.beta > 0;
    if alpha_present != beta_present {
        return Some(if alpha_present { Team::Alpha } else { Team::Beta });
    }

    let alpha_exposed = standing.flag_held(Team::Alpha);
    let beta_exposed = standing.flag_held(Team::Beta);
    if alpha_exposed != beta_exposed {
        return Some(if alpha_exposed { Team::Beta } else { Team::Alpha });
    }

    None
}

/// Winner after a capture when one team leads by [`QUICK_END_LEAD`] or more.
pub fn quick_end(standing: &Standing) -> Option<Team> {
    if standing.score_lead() >= QUICK_END_LEAD {
        winner_by_time(standing)
    } else {
        None
    }
}

/// Whether enough players remain to leave `phase`.
///
/// Lobby needs two online players, preparation needs someone online on each
/// side. Later phases have no extra requirement.
pub fn has_sufficient_players(phase: Phase, online_players: u32, team_online: PerTeam<u32>) -> bool {
    match phase {
        Phase::Lobby => online_players >= 2,
        Phase::Preparation => team_online.alpha > 0 && team_online.beta > 0,
        Phase::Combat | Phase::SuddenDeath | Phase::Ended => true,
    }
}
