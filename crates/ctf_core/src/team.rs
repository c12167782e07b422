//! Teams and per-team storage
//!
//! A player without a team is modelled as `Option<Team>::None`, so a
//! `Team` value always names one of the two playing sides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two playing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Alpha,
    Beta,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Alpha, Team::Beta];

    pub fn opponent(self) -> Self {
        match self {
            Team::Alpha => Team::Beta,
            Team::Beta => Team::Alpha,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Alpha => "alpha",
            Team::Beta => "beta",
        }
    }

    /// Case-insensitive lookup, used by hosts parsing team names from commands.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "alpha" => Some(Team::Alpha),
            "beta" => Some(Team::Beta),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each team, indexable by [`Team`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerTeam<T> {
    pub alpha: T,
    pub beta: T,
}

impl<T> PerTeam<T> {
    pub fn new(alpha: T, beta: T) -> Self {
        Self { alpha, beta }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Alpha, &self.alpha), (Team::Beta, &self.beta)].into_iter()
    }
}

impl<T> Index<Team> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        match team {
            Team::Alpha => &self.alpha,
            Team::Beta => &self.beta,
        }
    }
}

impl<T> IndexMut<Team> for PerTeam<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Alpha => &mut self.alpha,
            Team::Beta => &mut self.beta,
        }
    }
}
