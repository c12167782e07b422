//! Host that turns every controller request into a log line

use ctf_core::{Loadout, MatchHost, Outcome, PerTeam, PlayerId, Team};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct LogHost {
    /// Reason passed to the last `match_aborted`
    pub abort_reason: Option<String>,
}

impl MatchHost for LogHost {
    /// Names of the items the player carried
    type Inventory = Vec<String>;

    fn decide_positions(&mut self) {
        debug!("flag and spawn positions decided");
    }

    fn set_team(&mut self, id: PlayerId, team: Team) {
        debug!(player = %id, %team, "team colour set");
    }

    fn set_pvp(&mut self, id: PlayerId, enabled: bool) {
        debug!(player = %id, enabled, "pvp toggled");
    }

    fn apply_loadout(&mut self, id: PlayerId, loadout: &Loadout) {
        debug!(player = %id, loadout = %loadout.name, hp = loadout.hp, mana = loadout.mana, "loadout applied");
    }

    fn warp_to_spawn(&mut self, id: PlayerId, team: Team) {
        debug!(player = %id, %team, "warped to spawn");
    }

    fn set_permadeath(&mut self, id: PlayerId, drops: bool) {
        debug!(player = %id, drops, "permadeath on");
    }

    fn snapshot_inventory(&mut self, id: PlayerId) -> Vec<String> {
        debug!(player = %id, "inventory saved");
        vec![format!("belongings of {}", id)]
    }

    fn player_joined(&mut self, id: PlayerId, team: Option<Team>) {
        match team {
            Some(team) => info!("{} joined the {} team.", id, team),
            None => info!("{} joined the game.", id),
        }
    }

    fn player_rejoined(&mut self, id: PlayerId, team: Team) {
        info!("{} rejoined the {} team.", id, team);
    }

    fn player_left(&mut self, id: PlayerId, team: Team) {
        info!("{} left the {} team.", id, team);
    }

    fn flag_taken(&mut self, id: PlayerId, team: Team) {
        info!("{} is taking {} team flag!", id, team.opponent());
    }

    fn flag_captured(&mut self, id: PlayerId, team: Team, score: PerTeam<u32>) {
        info!(
            "{} captured {} team flag and scored a point! (alpha {} - {} beta)",
            id,
            team.opponent(),
            score.alpha,
            score.beta
        );
    }

    fn flag_dropped(&mut self, id: PlayerId, team: Team) {
        info!("{} dropped {} team flag.", id, team.opponent());
    }

    fn match_started(&mut self) {
        info!("The game has started! You have time to prepare your base.");
    }

    fn combat_started(&mut self) {
        info!("Preparation phase has ended! Capture the other team's flag!");
    }

    fn sudden_death_started(&mut self) {
        info!("Sudden death has begun! First team to touch the enemy flag wins.");
    }

    fn match_ended(&mut self, outcome: Outcome, score: PerTeam<u32>) {
        match outcome {
            Outcome::Winner(team) => info!(
                "The {} team wins! (alpha {} - {} beta)",
                team, score.alpha, score.beta
            ),
            Outcome::Draw => info!("Game ended in a draw. (alpha {} - {} beta)", score.alpha, score.beta),
        }
    }

    fn match_aborted(&mut self, reason: &str) {
        warn!("Game has been aborted: {}", reason);
        self.abort_reason = Some(reason.to_string());
    }

    fn tell_team(&mut self, id: PlayerId, team: Team) {
        debug!(player = %id, "you are on the {} team", team);
    }

    fn tell_pick_loadout(&mut self, id: PlayerId) {
        debug!(player = %id, "asked to pick a class");
    }

    fn tell_current_loadout(&mut self, id: PlayerId, loadout: &str) {
        debug!(player = %id, "your class is {}", loadout);
    }

    fn player_switched_team(&mut self, id: PlayerId, team: Team) {
        info!("{} switched to the {} team.", id, team);
    }
}
