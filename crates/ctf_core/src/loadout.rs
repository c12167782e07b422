//! Loadouts (player classes)
//!
//! A loadout is a named bundle of starting stats and items a player picks
//! once per match. Ownership and storage of loadouts belong to the host;
//! the catalog here is an in-memory view the host fills.

use serde::{Deserialize, Serialize};

/// One inventory slot of a loadout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadoutItem {
    pub item_id: i32,
    pub stack: i32,
    pub prefix: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub hp: u32,
    pub mana: u32,
    pub items: Vec<LoadoutItem>,
    /// Purchase price; 0 means free
    pub price: u32,
    /// Hidden loadouts are not listed to ordinary players
    pub hidden: bool,
    /// Whether the loadout can be bought
    pub sell: bool,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: None,
            hp: 100,
            mana: 20,
            items: Vec::new(),
            price: 0,
            hidden: true,
            sell: false,
        }
    }
}

impl Loadout {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), ..Self::default() }
    }

    /// Packages are loadouts whose name starts with `*`.
    pub fn is_package(&self) -> bool {
        self.name.starts_with('*')
    }

    /// Free loadouts that are on sale are open to everyone; anything else
    /// has to be owned.
    pub fn usable_by(&self, owned: &[u32]) -> bool {
        (self.price == 0 && self.sell) || owned.contains(&self.id)
    }
}

/// In-memory loadout lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadoutCatalog {
    loadouts: Vec<Loadout>,
}

impl LoadoutCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace (by id)
    pub fn insert(&mut self, loadout: Loadout) {
        if let Some(existing) = self.loadouts.iter_mut().find(|l| l.id == loadout.id) {
            *existing = loadout;
        } else {
            self.loadouts.push(loadout);
        }
    }

    pub fn remove(&mut self, id: u32) -> Option<Loadout> {
        let idx = self.loadouts.iter().position(|l| l.id == id)?;
        Some(self.loadouts.remove(idx))
    }

    pub fn get(&self, id: u32) -> Option<&Loadout> {
        self.loadouts.iter().find(|l| l.id == id)
    }

    /// Case-insensitive name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Loadout> {
        self.loadouts.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Loadouts listed to ordinary players
    pub fn visible(&self) -> impl Iterator<Item = &Loadout> {
        self.loadouts.iter().filter(|l| !l.hidden)
    }

    pub fn len(&self) -> usize {
        self.loadouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loadouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Loadout {
        Loadout { hidden: false, sell: true, ..Loadout::new(1, "Warrior") }
    }

    #[test]
    fn test_defaults_match_new_class() {
        let loadout = Loadout::new(5, "Archer");
        assert_eq!(loadout.hp, 100);
        assert_eq!(loadout.mana, 20);
        assert!(loadout.hidden);
        assert!(!loadout.sell);
    }

    #[test]
    fn test_usable_by() {
        let free = warrior();
        assert!(free.usable_by(&[]));

        let paid = Loadout { price: 200, ..warrior() };
        assert!(!paid.usable_by(&[]));
        assert!(paid.usable_by(&[1]));

        // free but not on sale still needs ownership
        let unlisted = Loadout { sell: false, ..warrior() };
        assert!(!unlisted.usable_by(&[]));
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = LoadoutCatalog::new();
        catalog.insert(warrior());
        catalog.insert(Loadout::new(2, "*Starter Pack"));
        assert_eq!(catalog.len(), 2);

        assert_eq!(catalog.find_by_name("warrior").map(|l| l.id), Some(1));
        assert!(catalog.get(2).is_some_and(Loadout::is_package));
        assert_eq!(catalog.visible().count(), 1);

        catalog.insert(Loadout { hp: 150, ..warrior() });
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(|l| l.hp), Some(150));

        assert!(catalog.remove(2).is_some());
        assert!(catalog.remove(2).is_none());
    }
}
