//! Roster definitions: ship templates per side, loaded from YAML or JSON or
//! taken from the built-in default. Every trial instantiates fresh ships from them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::{Faction, Match, Ship, ShipId};
use crate::error::RosterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipTemplate {
    pub name: String,
    /// Pilot skill: higher acts first and is targeted first.
    pub priority: i32,
    pub attack: u32,
    pub defense: u32,
    pub hull: i32,
    #[serde(default)]
    pub shields: u32,
    #[serde(default)]
    pub grants_squad_reroll: bool,
    /// Identical copies of this ship to field.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub name: String,
    pub side_a: Vec<ShipTemplate>,
    pub side_b: Vec<ShipTemplate>,
}

impl ShipTemplate {
    pub fn new(name: &str, priority: i32, attack: u32, defense: u32, hull: i32, shields: u32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            attack,
            defense,
            hull,
            shields,
            grants_squad_reroll: false,
            count: 1,
        }
    }

    pub fn granting_squad_reroll(mut self) -> Self {
        self.grants_squad_reroll = true;
        self
    }

    fn instantiate(&self, id: ShipId, faction: Faction) -> Ship {
        let mut ship = Ship::new(id, self.name.clone(), faction, self.priority);
        ship.attack = self.attack;
        ship.defense = self.defense;
        ship.hull = self.hull;
        ship.shields = self.shields;
        ship.grants_squad_reroll = self.grants_squad_reroll;
        ship
    }
}

impl Roster {
    /// Fresh ship arena: side A first, then side B, copies expanded.
    pub fn build_ships(&self) -> Vec<Ship> {
        let sides = [(Faction::SideA, &self.side_a), (Faction::SideB, &self.side_b)];
        let mut ships = Vec::with_capacity(self.ship_count());
        for (faction, templates) in sides {
            for template in templates.iter() {
                for _ in 0..template.count {
                    let id = ShipId(ships.len());
                    ships.push(template.instantiate(id, faction));
                }
            }
        }
        ships
    }

    pub fn new_match(&self) -> Match {
        Match::new(self.build_ships())
    }

    pub fn ship_count(&self) -> usize {
        self.side_a
            .iter()
            .chain(&self.side_b)
            .map(|t| t.count as usize)
            .sum()
    }
}

/// Four X-wings against Howlrunner and five TIE fighters.
pub fn default_roster() -> Roster {
    Roster {
        name: "X-wings vs Howlrunner swarm".to_string(),
        side_a: vec![
            ShipTemplate::new("Luke Skywalker", 8, 3, 2, 3, 2),
            ShipTemplate::new("Jek Porkins", 7, 3, 2, 3, 2),
            ShipTemplate::new("Rookie Pilot", 8, 3, 2, 3, 2),
            ShipTemplate::new("Rookie Pilot", 7, 3, 2, 3, 2),
        ],
        side_b: vec![
            ShipTemplate::new("Howlrunner", 8, 2, 3, 3, 0).granting_squad_reroll(),
            ShipTemplate::new("Mauler Mithel", 7, 2, 3, 3, 0),
            ShipTemplate::new("Alpha Squadron Pilot", 8, 3, 3, 3, 0),
            ShipTemplate::new("Alpha Squadron Pilot", 7, 3, 3, 3, 0),
            ShipTemplate {
                count: 2,
                ..ShipTemplate::new("Academy Pilot", 1, 2, 3, 3, 0)
            },
        ],
    }
}

pub fn validate_roster(roster: &Roster) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();
    for (label, templates) in [("side_a", &roster.side_a), ("side_b", &roster.side_b)] {
        if templates.iter().all(|t| t.count == 0) {
            issues.push(format!("{label} has no ships"));
        }
        for (index, template) in templates.iter().enumerate() {
            if template.name.trim().is_empty() {
                issues.push(format!("{label}[{index}] has an empty name"));
            }
            if template.hull < 1 {
                issues.push(format!(
                    "{label}[{index}] '{}' has hull {} (must be at least 1)",
                    template.name, template.hull
                ));
            }
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

pub fn parse_roster_json(raw: &str) -> Result<Roster, RosterError> {
    let roster: Roster = serde_json::from_str(raw)?;
    validate_roster(&roster).map_err(RosterError::Invalid)?;
    Ok(roster)
}

pub fn parse_roster_yaml(raw: &str) -> Result<Roster, RosterError> {
    let roster: Roster = serde_yaml::from_str(raw)?;
    validate_roster(&roster).map_err(RosterError::Invalid)?;
    Ok(roster)
}

/// Load a roster file; `.json` is parsed as JSON, anything else as YAML.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster, RosterError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_roster_json(&raw)
    } else {
        parse_roster_yaml(&raw)
    }
}
