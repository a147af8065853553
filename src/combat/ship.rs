//! Ships, factions and the per-trial ship arena they live in.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Owns no ships; doubles as the draw marker in match results.
    #[default]
    Neutral,
    #[serde(alias = "rebels")]
    SideA,
    #[serde(alias = "empire")]
    SideB,
}

impl Faction {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Neutral => Self::Neutral,
            Self::SideA => Self::SideB,
            Self::SideB => Self::SideA,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::SideA => "Side A",
            Self::SideB => "Side B",
        }
    }
}

/// Index of a ship in its trial's arena. Only meaningful inside that trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShipId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub faction: Faction,
    pub priority: i32,
    pub attack: u32,
    pub defense: u32,
    pub hull: i32,
    pub shields: u32,
    pub focus_tokens: u32,
    pub evade_tokens: u32,
    pub locked_onto: Option<ShipId>,
    /// Received squad reroll; re-derived every round from living granters.
    pub has_squad_reroll: bool,
    pub grants_squad_reroll: bool,
    pub destroyed: bool,
}

impl Ship {
    pub fn new(id: ShipId, name: impl Into<String>, faction: Faction, priority: i32) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            priority,
            attack: 0,
            defense: 0,
            hull: 1,
            shields: 0,
            focus_tokens: 0,
            evade_tokens: 0,
            locked_onto: None,
            has_squad_reroll: false,
            grants_squad_reroll: false,
            destroyed: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    pub fn focus(&mut self) -> &mut Self {
        self.focus_tokens += 1;
        self
    }

    pub fn evade(&mut self) -> &mut Self {
        self.evade_tokens += 1;
        self
    }

    pub fn acquire_target_lock(&mut self, target: ShipId) -> &mut Self {
        self.locked_onto = Some(target);
        self
    }

    pub fn spend_target_lock(&mut self) -> &mut Self {
        self.locked_onto = None;
        self
    }

    pub fn spend_focus_token(&mut self) {
        assert!(self.focus_tokens > 0, "{} spent a focus token it does not hold", self.name);
        self.focus_tokens -= 1;
    }

    pub fn spend_evade_token(&mut self) {
        assert!(self.evade_tokens > 0, "{} spent an evade token it does not hold", self.name);
        self.evade_tokens -= 1;
    }

    /// End-of-round cleanup: unspent focus and evade tokens are discarded.
    pub fn clean_up(&mut self) -> &mut Self {
        self.focus_tokens = 0;
        self.evade_tokens = 0;
        self
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Ship {} skill={} attack={} defense={} hull={} shields={}>",
            self.name, self.priority, self.attack, self.defense, self.hull, self.shields
        )
    }
}

/// Ships of one faction, ordered by descending priority. Ties keep roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Squadron {
    pub faction: Faction,
    members: Vec<ShipId>,
}

impl Squadron {
    pub fn new(faction: Faction, ships: &[Ship]) -> Self {
        let mut members: Vec<&Ship> = ships.iter().filter(|s| s.faction == faction).collect();
        members.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self {
            faction,
            members: members.into_iter().map(|s| s.id).collect(),
        }
    }

    pub fn members(&self) -> &[ShipId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Borrow two distinct ships of the arena mutably.
pub fn pair_mut(ships: &mut [Ship], a: ShipId, b: ShipId) -> (&mut Ship, &mut Ship) {
    assert_ne!(a, b, "a ship cannot attack itself");
    if a.0 < b.0 {
        let (left, right) = ships.split_at_mut(b.0);
        (&mut left[a.0], &mut right[0])
    } else {
        let (left, right) = ships.split_at_mut(a.0);
        (&mut right[0], &mut left[b.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(id: usize, faction: Faction, priority: i32) -> Ship {
        Ship::new(ShipId(id), format!("ship-{id}"), faction, priority)
    }

    #[test]
    fn squadron_sorts_by_descending_priority_keeping_ties_stable() {
        let ships = vec![
            ship(0, Faction::SideA, 7),
            ship(1, Faction::SideB, 9),
            ship(2, Faction::SideA, 8),
            ship(3, Faction::SideA, 7),
        ];
        let squadron = Squadron::new(Faction::SideA, &ships);
        assert_eq!(squadron.members(), &[ShipId(2), ShipId(0), ShipId(3)]);
    }

    #[test]
    fn clean_up_discards_tokens_but_keeps_lock_and_damage() {
        let mut s = ship(0, Faction::SideA, 1);
        s.hull = 2;
        s.focus().focus().evade().acquire_target_lock(ShipId(4));
        s.clean_up();
        assert_eq!((s.focus_tokens, s.evade_tokens), (0, 0));
        assert_eq!(s.locked_onto, Some(ShipId(4)));
        assert_eq!(s.hull, 2);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut ships = vec![ship(0, Faction::SideA, 1), ship(1, Faction::SideB, 1)];
        let (a, b) = pair_mut(&mut ships, ShipId(1), ShipId(0));
        assert_eq!((a.id, b.id), (ShipId(1), ShipId(0)));
    }

    #[test]
    #[should_panic(expected = "does not hold")]
    fn spending_missing_token_is_fatal() {
        ship(0, Faction::SideA, 1).spend_focus_token();
    }

    #[test]
    fn faction_opponents() {
        assert_eq!(Faction::SideA.opponent(), Faction::SideB);
        assert_eq!(Faction::SideB.opponent(), Faction::SideA);
    }
}
