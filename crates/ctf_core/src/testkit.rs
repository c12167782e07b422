//! Recording host for unit tests

use crate::host::MatchHost;
use crate::loadout::Loadout;
use crate::player::PlayerId;
use crate::rules::Outcome;
use crate::team::{PerTeam, Team};
use crate::{MatchConfig, MatchController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    DecidePositions,
    SetTeam(PlayerId, Team),
    SetPvp(PlayerId, bool),
    ApplyLoadout(PlayerId, String),
    WarpToSpawn(PlayerId, Team),
    SetPermadeath(PlayerId, bool),
    SnapshotInventory(PlayerId),
    PlayerJoined(PlayerId, Option<Team>),
    PlayerRejoined(PlayerId, Team),
    PlayerLeft(PlayerId, Team),
    FlagTaken(PlayerId, Team),
    FlagCaptured(PlayerId, Team, PerTeam<u32>),
    FlagDropped(PlayerId, Team),
    MatchStarted,
    CombatStarted,
    SuddenDeathStarted,
    MatchEnded(Outcome, PerTeam<u32>),
    MatchAborted(String),
    TellTeam(PlayerId, Team),
    TellPickLoadout(PlayerId),
    TellCurrentLoadout(PlayerId, String),
    PlayerSwitchedTeam(PlayerId, Team),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn take(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl MatchHost for RecordingHost {
    type Inventory = String;

    fn decide_positions(&mut self) {
        self.calls.push(HostCall::DecidePositions);
    }

    fn set_team(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::SetTeam(id, team));
    }

    fn set_pvp(&mut self, id: PlayerId, enabled: bool) {
        self.calls.push(HostCall::SetPvp(id, enabled));
    }

    fn apply_loadout(&mut self, id: PlayerId, loadout: &Loadout) {
        self.calls.push(HostCall::ApplyLoadout(id, loadout.name.clone()));
    }

    fn warp_to_spawn(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::WarpToSpawn(id, team));
    }

    fn set_permadeath(&mut self, id: PlayerId, drops: bool) {
        self.calls.push(HostCall::SetPermadeath(id, drops));
    }

    fn snapshot_inventory(&mut self, id: PlayerId) -> String {
        self.calls.push(HostCall::SnapshotInventory(id));
        format!("inventory of {}", id)
    }

    fn player_joined(&mut self, id: PlayerId, team: Option<Team>) {
        self.calls.push(HostCall::PlayerJoined(id, team));
    }

    fn player_rejoined(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::PlayerRejoined(id, team));
    }

    fn player_left(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::PlayerLeft(id, team));
    }

    fn flag_taken(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::FlagTaken(id, team));
    }

    fn flag_captured(&mut self, id: PlayerId, team: Team, score: PerTeam<u32>) {
        self.calls.push(HostCall::FlagCaptured(id, team, score));
    }

    fn flag_dropped(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::FlagDropped(id, team));
    }

    fn match_started(&mut self) {
        self.calls.push(HostCall::MatchStarted);
    }

    fn combat_started(&mut self) {
        self.calls.push(HostCall::CombatStarted);
    }

    fn sudden_death_started(&mut self) {
        self.calls.push(HostCall::SuddenDeathStarted);
    }

    fn match_ended(&mut self, outcome: Outcome, score: PerTeam<u32>) {
        self.calls.push(HostCall::MatchEnded(outcome, score));
    }

    fn match_aborted(&mut self, reason: &str) {
        self.calls.push(HostCall::MatchAborted(reason.to_string()));
    }

    fn tell_team(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::TellTeam(id, team));
    }

    fn tell_pick_loadout(&mut self, id: PlayerId) {
        self.calls.push(HostCall::TellPickLoadout(id));
    }

    fn tell_current_loadout(&mut self, id: PlayerId, loadout: &str) {
        self.calls.push(HostCall::TellCurrentLoadout(id, loadout.to_string()));
    }

    fn player_switched_team(&mut self, id: PlayerId, team: Team) {
        self.calls.push(HostCall::PlayerSwitchedTeam(id, team));
    }
}

pub type TestController = MatchController<RecordingHost>;

pub fn controller(seed: u64) -> TestController {
    MatchController::with_seed(MatchConfig::default(), RecordingHost::default(), seed)
}

pub fn controller_with(config: MatchConfig, seed: u64) -> TestController {
    MatchController::with_seed(config, RecordingHost::default(), seed)
}

/// Join `ids` in the lobby and start the match (Preparation).
pub fn started(ids: &[u32], seed: u64) -> TestController {
    let mut ctl = controller(seed);
    for &id in ids {
        ctl.join_game(PlayerId(id)).unwrap();
    }
    ctl.start_game().unwrap();
    ctl.host_mut().take();
    ctl
}

/// Two players, advanced to Combat. Returns (controller, alpha player, beta player).
pub fn one_v_one_in_combat(seed: u64) -> (TestController, PlayerId, PlayerId) {
    let mut ctl = started(&[1, 2], seed);
    ctl.start_combat().unwrap();
    ctl.host_mut().take();
    let alpha = members(&ctl, Team::Alpha)[0];
    let beta = members(&ctl, Team::Beta)[0];
    (ctl, alpha, beta)
}

pub fn members(ctl: &TestController, team: Team) -> Vec<PlayerId> {
    ctl.players().filter(|p| p.team() == Some(team)).map(|p| p.id()).collect()
}

/// Counter invariants that must hold after every public operation
pub fn assert_invariants(ctl: &TestController) {
    let team_sum = ctl.team_players(Team::Alpha) + ctl.team_players(Team::Beta);
    assert!(team_sum <= ctl.total_players(), "team players exceed total");
    for team in Team::ALL {
        assert!(ctl.team_online(team) <= ctl.team_players(team), "{} online exceeds members", team);
        if let Some(holder) = ctl.flag_holder(team) {
            assert_ne!(ctl.team_of(holder), Some(team), "{} flag held by own member", team);
        }
    }
}
