//! Match Controller
//!
//! Owns every piece of match state and drives the phase machine:
//!
//! ```text
//! Lobby -> Preparation -> Combat -> SuddenDeath -> Ended
//!                                \-------------> Ended
//! ```
//!
//! Any phase can jump to `Ended` through [`MatchController::abort_game`].
//! Effects are requested from the [`MatchHost`]; the controller itself does
//! no IO.
//!
//! Public operations validate their preconditions first and return a
//! [`CtfError`] without mutating anything when the host breaks the contract.
//! Internal helpers run after validation and rely on the invariants.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::error::{CtfError, Result};
use crate::host::MatchHost;
use crate::loadout::Loadout;
use crate::phase::Phase;
use crate::player::{PlayerId, PlayerRecord};
use crate::rules::{self, Outcome, Standing};
use crate::team::{PerTeam, Team};

/// Abort reason used when a phase ends without enough players
pub const INSUFFICIENT_PLAYERS: &str = "Insufficient players";

pub struct MatchController<H: MatchHost, R = ChaCha8Rng> {
    host: H,
    rng: R,
    config: MatchConfig,
    phase: Phase,
    players: BTreeMap<PlayerId, PlayerRecord<H::Inventory>>,
    total_players: u32,
    online_players: u32,
    team_players: PerTeam<u32>,
    standing: Standing,
    outcome: Option<Outcome>,
}

impl<H: MatchHost> MatchController<H, ChaCha8Rng> {
    /// Controller with a seeded ChaCha RNG (same seed = same team draws)
    pub fn with_seed(config: MatchConfig, host: H, seed: u64) -> Self {
        Self::new(config, host, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<H: MatchHost, R: Rng> MatchController<H, R> {
    pub fn new(config: MatchConfig, host: H, rng: R) -> Self {
        Self {
            host,
            rng,
            config,
            phase: Phase::Lobby,
            players: BTreeMap::new(),
            total_players: 0,
            online_players: 0,
            team_players: PerTeam::default(),
            standing: Standing::default(),
            outcome: None,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn is_pvp_phase(&self) -> bool {
        self.phase.is_pvp()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord<H::Inventory>> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord<H::Inventory>> {
        self.players.values()
    }

    /// `None` for unknown players and players not yet assigned
    pub fn team_of(&self, id: PlayerId) -> Option<Team> {
        self.players.get(&id).and_then(PlayerRecord::team)
    }

    pub fn has_loadout(&self, id: PlayerId) -> bool {
        self.players.get(&id).is_some_and(PlayerRecord::has_loadout)
    }

    pub fn is_dead(&self, id: PlayerId) -> bool {
        self.players.get(&id).is_some_and(PlayerRecord::is_dead)
    }

    pub fn total_players(&self) -> u32 {
        self.total_players
    }

    pub fn online_players(&self) -> u32 {
        self.online_players
    }

    pub fn team_players(&self, team: Team) -> u32 {
        self.team_players[team]
    }

    pub fn team_online(&self, team: Team) -> u32 {
        self.standing.online[team]
    }

    pub fn score(&self, team: Team) -> u32 {
        self.standing.score[team]
    }

    /// Enemy player carrying `team`'s flag
    pub fn flag_holder(&self, team: Team) -> Option<PlayerId> {
        self.standing.flag_holder[team]
    }

    pub fn standing(&self) -> &Standing {
        &self.standing
    }

    /// Set once the match ended normally; stays `None` after an abort
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    // ========================
    // Player lifecycle
    // ========================

    pub fn join_game(&mut self, id: PlayerId) -> Result<()> {
        self.require_not_phase("join_game", Phase::SuddenDeath)?;
        if self.players.contains_key(&id) {
            return Err(CtfError::PlayerExists(id));
        }

        self.players.insert(id, PlayerRecord::new(id));
        self.total_players += 1;
        self.online_players += 1;

        if self.is_running() {
            let team = self.assign_team(id);
            self.standing.online[team] += 1;
            self.host.player_joined(id, Some(team));
            self.start_player(id);
        } else {
            self.host.player_joined(id, None);
        }
        debug!(player = %id, total = self.total_players, online = self.online_players, "player joined");
        Ok(())
    }

    pub fn rejoin_game(&mut self, id: PlayerId) -> Result<()> {
        self.require_not_phase("rejoin_game", Phase::SuddenDeath)?;
        self.require_running("rejoin_game")?;
        let record = self.record(id)?;
        if record.is_online() {
            return Err(CtfError::AlreadyOnline(id));
        }
        let team = record.team().ok_or(CtfError::NoTeam(id))?;
        let dead = record.is_dead();

        self.record_mut(id).set_online(true);
        if !dead {
            self.standing.online[team] += 1;
            self.host.player_rejoined(id, team);
            self.start_player(id);
        }
        self.online_players += 1;
        debug!(player = %id, %team, "player rejoined");
        Ok(())
    }

    pub fn leave_game(&mut self, id: PlayerId) -> Result<()> {
        let record = self.record(id)?;
        if !record.is_online() || record.has_left() {
            return Err(CtfError::NotOnline(id));
        }
        let team = record.team();
        let dead = record.is_dead();
        let had_loadout = record.has_loadout();

        match self.phase {
            Phase::Lobby => {
                self.players.remove(&id);
                self.total_players -= 1;
                self.online_players -= 1;
                debug!(player = %id, total = self.total_players, "player left lobby");
                return Ok(());
            }
            Phase::Ended => {
                // kept for settlement
                self.record_mut(id).set_online(false);
                self.online_players -= 1;
                debug!(player = %id, online = self.online_players, "player left after the match");
                return Ok(());
            }
            _ => {}
        }

        let team = team.ok_or(CtfError::NoTeam(id))?;

        // In sudden death a leaver keeps their place and counts as eliminated.
        if self.phase == Phase::SuddenDeath {
            self.record_mut(id).mark_left();
        } else {
            self.record_mut(id).set_online(false);
        }
        if !dead {
            self.standing.online[team] = self.standing.online[team].saturating_sub(1);
        }
        if had_loadout {
            let inventory = self.host.snapshot_inventory(id);
            self.record_mut(id).store_inventory(inventory);
        }
        self.drop_flag(id, team);
        self.host.player_left(id, team);
        self.online_players -= 1;
        debug!(player = %id, %team, online = self.standing.online[team], "player left match");

        if self.phase == Phase::SuddenDeath {
            if let Some(loser) = Team::ALL.into_iter().find(|t| self.standing.online[*t] == 0) {
                self.finish(Outcome::Winner(loser.opponent()));
            }
        }
        Ok(())
    }

    pub fn pick_class(&mut self, id: PlayerId, loadout: Loadout) -> Result<()> {
        self.require_running("pick_class")?;
        if !self.record(id)?.is_online() {
            return Err(CtfError::NotOnline(id));
        }

        let name = loadout.name.clone();
        self.host.tell_current_loadout(id, &name);
        self.host.apply_loadout(id, &loadout);
        self.record_mut(id).set_loadout(loadout);
        debug!(player = %id, loadout = %name, "loadout picked");
        Ok(())
    }

    // ========================
    // Flag events
    // ========================

    /// Player touched the enemy flag.
    pub fn get_flag(&mut self, id: PlayerId) -> Result<()> {
        let Some(team) = self.record(id)?.team() else {
            return Ok(());
        };
        let enemy = team.opponent();
        if self.standing.flag_held(enemy) {
            return Ok(());
        }

        self.host.flag_taken(id, team);
        self.standing.flag_holder[enemy] = Some(id);
        debug!(player = %id, %team, "flag taken");

        if self.phase == Phase::SuddenDeath {
            self.finish(Outcome::Winner(team));
        }
        Ok(())
    }

    /// Player reached their own capture point.
    pub fn capture_flag(&mut self, id: PlayerId) -> Result<()> {
        let team = self.record(id)?.team();

        if let Some(team) = team {
            let enemy = team.opponent();
            if self.standing.flag_holder[enemy] == Some(id) {
                self.standing.flag_holder[enemy] = None;
                self.standing.score[team] += 1;
                self.host.flag_captured(id, team, self.standing.score);
                info!(player = %id, %team, alpha = self.standing.score.alpha, beta = self.standing.score.beta, "flag captured");
            }
        }

        if self.is_running() {
            if let Some(winner) = rules::quick_end(&self.standing) {
                self.finish(Outcome::Winner(winner));
            }
        }
        Ok(())
    }

    pub fn flag_drop(&mut self, id: PlayerId) -> Result<()> {
        if let Some(team) = self.record(id)?.team() {
            self.drop_flag(id, team);
        }
        Ok(())
    }

    // ========================
    // Phase machine
    // ========================

    /// Called when the phase countdown expires.
    pub fn next_phase(&mut self) -> Result<()> {
        if self.phase.is_terminal() {
            return Err(CtfError::MatchOver);
        }
        if self.config.abort_on_insufficient_players
            && !rules::has_sufficient_players(self.phase, self.online_players, self.standing.online)
        {
            return self.abort_game(INSUFFICIENT_PLAYERS);
        }

        match self.phase {
            Phase::Lobby => self.start_game(),
            Phase::Preparation => self.start_combat(),
            Phase::Combat => self.game_timeout(),
            Phase::SuddenDeath => self.end_game(Outcome::Draw),
            Phase::Ended => Err(CtfError::MatchOver),
        }
    }

    pub fn start_game(&mut self) -> Result<()> {
        self.require_phase("start_game", Phase::Lobby)?;
        if let Some(assigned) = self.players.values().find(|p| p.team().is_some()) {
            warn!(player = %assigned.id(), "lobby player already has a team");
            return Err(CtfError::WrongPhase { operation: "start_game", phase: self.phase });
        }

        self.enter(Phase::Preparation);
        self.host.decide_positions();
        self.host.match_started();

        let mut order: Vec<PlayerId> = self.players.keys().copied().collect();
        order.shuffle(&mut self.rng);
        for id in order {
            let team = self.assign_team(id);
            self.standing.online[team] += 1;
            self.start_player(id);
        }
        info!(alpha = self.team_players.alpha, beta = self.team_players.beta, "teams assigned");
        Ok(())
    }

    pub fn start_combat(&mut self) -> Result<()> {
        self.require_phase("start_combat", Phase::Preparation)?;

        self.enter(Phase::Combat);
        self.host.combat_started();
        let pvp = self.is_pvp_phase();
        for record in self.players.values().filter(|p| p.is_online()) {
            if let Some(team) = record.team() {
                self.host.warp_to_spawn(record.id(), team);
                self.host.set_pvp(record.id(), pvp);
            }
        }
        Ok(())
    }

    /// Combat clock ran out: decide by time or go to sudden death.
    pub fn game_timeout(&mut self) -> Result<()> {
        self.require_phase("game_timeout", Phase::Combat)?;

        match rules::winner_by_time(&self.standing) {
            Some(winner) => self.finish(Outcome::Winner(winner)),
            None => self.start_sudden_death(),
        }
        Ok(())
    }

    pub fn sd_death(&mut self, id: PlayerId) -> Result<()> {
        self.require_phase("sd_death", Phase::SuddenDeath)?;
        let record = self.record(id)?;
        let team = record.team().ok_or(CtfError::NoTeam(id))?;
        if record.is_dead() {
            warn!(player = %id, "sudden death kill on a dead player ignored");
            return Ok(());
        }

        self.record_mut(id).mark_dead();
        let online = &mut self.standing.online[team];
        *online = online.saturating_sub(1);
        debug!(player = %id, %team, remaining = *online, "sudden death elimination");
        if *online == 0 {
            self.finish(Outcome::Winner(team.opponent()));
        }
        Ok(())
    }

    pub fn end_game(&mut self, outcome: Outcome) -> Result<()> {
        self.require_running("end_game")?;
        self.finish(outcome);
        Ok(())
    }

    pub fn abort_game(&mut self, reason: &str) -> Result<()> {
        if self.phase.is_terminal() {
            return Err(CtfError::MatchOver);
        }
        self.enter(Phase::Ended);
        self.host.match_aborted(reason);
        warn!(reason, "match aborted");
        Ok(())
    }

    /// Move a player to `target`. Returns `false` if they are already there.
    pub fn switch_team(&mut self, id: PlayerId, target: Team) -> Result<bool> {
        self.require_not_phase("switch_team", Phase::SuddenDeath)?;
        let record = self.record(id)?;
        let current = record.team().ok_or(CtfError::NoTeam(id))?;
        if current == target {
            return Ok(false);
        }
        let counted_online = record.counts_online();

        // a carrier cannot keep the flag of the team they are joining
        self.drop_flag(id, current);

        self.record_mut(id).set_team(target);
        self.team_players[current] -= 1;
        self.team_players[target] += 1;
        if counted_online {
            self.standing.online[current] = self.standing.online[current].saturating_sub(1);
            self.standing.online[target] += 1;
        }

        self.push_team_state(id);
        self.host.player_switched_team(id, target);
        self.warp(id);
        info!(player = %id, from = %current, to = %target, "player switched team");
        Ok(true)
    }

    // ========================
    // Internals
    // ========================

    fn record(&self, id: PlayerId) -> Result<&PlayerRecord<H::Inventory>> {
        self.players.get(&id).ok_or(CtfError::UnknownPlayer(id))
    }

    /// Only called for ids already validated by the public entry point.
    fn record_mut(&mut self, id: PlayerId) -> &mut PlayerRecord<H::Inventory> {
        self.players
            .get_mut(&id)
            .expect("validated player")
    }

    fn require_phase(&self, operation: &'static str, phase: Phase) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(CtfError::WrongPhase { operation, phase: self.phase })
        }
    }

    fn require_not_phase(&self, operation: &'static str, phase: Phase) -> Result<()> {
        if self.phase == phase {
            Err(CtfError::WrongPhase { operation, phase })
        } else {
            Ok(())
        }
    }

    fn require_running(&self, operation: &'static str) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(CtfError::NotRunning { operation })
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug_assert!(phase > self.phase, "phase regression {} -> {}", self.phase, phase);
        info!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
    }

    fn finish(&mut self, outcome: Outcome) {
        self.enter(Phase::Ended);
        self.outcome = Some(outcome);
        self.host.match_ended(outcome, self.standing.score);
        info!(?outcome, alpha = self.standing.score.alpha, beta = self.standing.score.beta, "match ended");
    }

    fn start_sudden_death(&mut self) {
        self.enter(Phase::SuddenDeath);
        self.host.sudden_death_started();
        let drops = self.config.sudden_death_allows_drops;
        for record in self.players.values().filter(|p| p.is_online()) {
            if let Some(team) = record.team() {
                self.host.warp_to_spawn(record.id(), team);
                self.host.set_permadeath(record.id(), drops);
            }
        }
    }

    /// Put a teamless player on the smaller team; coin flip on a tie.
    fn assign_team(&mut self, id: PlayerId) -> Team {
        let basis = if self.config.balance_by_online_count {
            self.standing.online
        } else {
            self.team_players
        };
        let team = match basis.alpha.cmp(&basis.beta) {
            Ordering::Less => Team::Alpha,
            Ordering::Greater => Team::Beta,
            Ordering::Equal => {
                if self.rng.gen_bool(0.5) {
                    Team::Alpha
                } else {
                    Team::Beta
                }
            }
        };

        self.record_mut(id).set_team(team);
        self.team_players[team] += 1;
        debug!(player = %id, %team, "team assigned");
        team
    }

    /// Team colour, PvP state, loadout prompt and spawn for a player
    /// entering a running match.
    fn start_player(&mut self, id: PlayerId) {
        self.push_team_state(id);

        let record = &self.players[&id];
        let Some(team) = record.team() else {
            return;
        };
        self.host.tell_team(id, team);
        match record.loadout() {
            None => self.host.tell_pick_loadout(id),
            Some(loadout) => {
                self.host.tell_current_loadout(id, &loadout.name);
                if record.is_online() {
                    self.host.apply_loadout(id, loadout);
                }
            }
        }
        self.warp(id);
    }

    fn push_team_state(&mut self, id: PlayerId) {
        let record = &self.players[&id];
        if !record.is_online() {
            return;
        }
        if let Some(team) = record.team() {
            self.host.set_team(id, team);
            self.host.set_pvp(id, self.phase.is_pvp());
        }
    }

    fn warp(&mut self, id: PlayerId) {
        let record = &self.players[&id];
        if let (true, Some(team)) = (record.is_online(), record.team()) {
            self.host.warp_to_spawn(id, team);
        }
    }

    fn drop_flag(&mut self, id: PlayerId, team: Team) {
        let enemy = team.opponent();
        if self.standing.flag_holder[enemy] == Some(id) {
            self.host.flag_dropped(id, team);
            self.standing.flag_holder[enemy] = None;
            debug!(player = %id, %team, "flag dropped");
        }
    }
}
