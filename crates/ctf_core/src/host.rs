//! Host callback contract
//!
//! The controller never touches the world, inventories or chat itself. It
//! asks its host through this trait. Every call is synchronous and is
//! assumed to succeed; no method may call back into the controller.

use crate::loadout::Loadout;
use crate::player::PlayerId;
use crate::rules::Outcome;
use crate::team::{PerTeam, Team};

pub trait MatchHost {
    /// Opaque snapshot of a player's belongings
    type Inventory;

    // ========== Commands ==========

    /// Pick flag and spawn positions for the new match
    fn decide_positions(&mut self);

    fn set_team(&mut self, id: PlayerId, team: Team);

    fn set_pvp(&mut self, id: PlayerId, enabled: bool);

    fn apply_loadout(&mut self, id: PlayerId, loadout: &Loadout);

    fn warp_to_spawn(&mut self, id: PlayerId, team: Team);

    /// Enter permadeath mode for sudden death. `drops` is
    /// `MatchConfig::sudden_death_allows_drops`.
    fn set_permadeath(&mut self, id: PlayerId, drops: bool);

    // ========== Queries ==========

    fn snapshot_inventory(&mut self, id: PlayerId) -> Self::Inventory;

    // ========== Notifications ==========

    /// `team` is `None` while the match has not started
    fn player_joined(&mut self, id: PlayerId, team: Option<Team>);

    fn player_rejoined(&mut self, id: PlayerId, team: Team);

    fn player_left(&mut self, id: PlayerId, team: Team);

    /// `team` is the taker's team
    fn flag_taken(&mut self, id: PlayerId, team: Team);

    fn flag_captured(&mut self, id: PlayerId, team: Team, score: PerTeam<u32>);

    fn flag_dropped(&mut self, id: PlayerId, team: Team);

    fn match_started(&mut self);

    fn combat_started(&mut self);

    fn sudden_death_started(&mut self);

    fn match_ended(&mut self, outcome: Outcome, score: PerTeam<u32>);

    fn match_aborted(&mut self, reason: &str);

    fn tell_team(&mut self, id: PlayerId, team: Team);

    fn tell_pick_loadout(&mut self, id: PlayerId);

    fn tell_current_loadout(&mut self, id: PlayerId, loadout: &str);

    fn player_switched_team(&mut self, id: PlayerId, team: Team);
}
