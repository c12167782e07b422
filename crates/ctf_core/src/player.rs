//! Per-participant match state

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::loadout::Loadout;
use crate::team::Team;

/// Stable identifier assigned by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Match state of one participant.
///
/// Created by `join_game` and only mutated by the controller, so the
/// fields are read through accessors. `I` is the host's inventory payload.
#[derive(Debug, Clone)]
pub struct PlayerRecord<I> {
    id: PlayerId,
    team: Option<Team>,
    loadout: Option<Loadout>,
    online: bool,
    dead: bool,
    /// Disconnected during sudden death; the record stays online
    left: bool,
    saved_inventory: Option<I>,
}

impl<I> PlayerRecord<I> {
    pub(crate) fn new(id: PlayerId) -> Self {
        Self {
            id,
            team: None,
            loadout: None,
            online: true,
            dead: false,
            left: false,
            saved_inventory: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn team(&self) -> Option<Team> {
        self.team
    }

    pub fn loadout(&self) -> Option<&Loadout> {
        self.loadout.as_ref()
    }

    pub fn has_loadout(&self) -> bool {
        self.loadout.is_some()
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Only meaningful during sudden death
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Left during sudden death, where the record is kept online
    pub fn has_left(&self) -> bool {
        self.left
    }

    /// Inventory captured the last time the player left while holding a loadout
    pub fn saved_inventory(&self) -> Option<&I> {
        self.saved_inventory.as_ref()
    }

    pub(crate) fn set_team(&mut self, team: Team) {
        self.team = Some(team);
    }

    pub(crate) fn set_loadout(&mut self, loadout: Loadout) {
        self.loadout = Some(loadout);
    }

    pub(crate) fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Sudden-death disconnect: eliminated but still marked present
    pub(crate) fn mark_left(&mut self) {
        self.dead = true;
        self.left = true;
    }

    pub(crate) fn store_inventory(&mut self, inventory: I) {
        self.saved_inventory = Some(inventory);
    }

    /// Whether the player counts toward their team's online total
    pub(crate) fn counts_online(&self) -> bool {
        self.online && !self.dead
    }
}
