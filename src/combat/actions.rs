use serde::{Deserialize, Serialize};

use crate::combat::ship::{Faction, Ship, ShipId};

/// Pre-attack hook, run once per activating ship per round.
///
/// `target` is the ship it is about to attack, if any enemy remains.
pub trait PilotAction: Sync {
    fn perform(&self, ship: &mut Ship, target: Option<ShipId>);
}

impl<F> PilotAction for F
where
    F: Fn(&mut Ship, Option<ShipId>) + Sync,
{
    fn perform(&self, ship: &mut Ship, target: Option<ShipId>) {
        self(ship, target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPolicy {
    None,
    #[default]
    Focus,
    Evade,
    TargetLock,
}

impl ActionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Some(Self::None),
            "focus" => Some(Self::Focus),
            "evade" => Some(Self::Evade),
            "target_lock" | "lock" => Some(Self::TargetLock),
            _ => None,
        }
    }
}

impl PilotAction for ActionPolicy {
    fn perform(&self, ship: &mut Ship, target: Option<ShipId>) {
        match self {
            Self::None => {}
            Self::Focus => {
                ship.focus();
            }
            Self::Evade => {
                ship.evade();
            }
            Self::TargetLock => {
                if let Some(target) = target {
                    ship.acquire_target_lock(target);
                }
            }
        }
    }
}

/// One policy per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideActions {
    #[serde(default)]
    pub side_a: ActionPolicy,
    #[serde(default)]
    pub side_b: ActionPolicy,
}

impl SideActions {
    pub const fn both(policy: ActionPolicy) -> Self {
        Self {
            side_a: policy,
            side_b: policy,
        }
    }
}

impl PilotAction for SideActions {
    fn perform(&self, ship: &mut Ship, target: Option<ShipId>) {
        match ship.faction {
            Faction::SideA => self.side_a.perform(ship, target),
            Faction::SideB => self.side_b.perform(ship, target),
            Faction::Neutral => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_grant_expected_tokens() {
        let mut ship = Ship::new(ShipId(0), "pilot", Faction::SideA, 3);
        ActionPolicy::Focus.perform(&mut ship, None);
        ActionPolicy::Evade.perform(&mut ship, None);
        ActionPolicy::TargetLock.perform(&mut ship, Some(ShipId(5)));
        ActionPolicy::None.perform(&mut ship, Some(ShipId(6)));
        assert_eq!(ship.focus_tokens, 1);
        assert_eq!(ship.evade_tokens, 1);
        assert_eq!(ship.locked_onto, Some(ShipId(5)));
    }

    #[test]
    fn side_actions_dispatch_by_faction() {
        let actions = SideActions {
            side_a: ActionPolicy::Focus,
            side_b: ActionPolicy::Evade,
        };
        let mut a = Ship::new(ShipId(0), "a", Faction::SideA, 1);
        let mut b = Ship::new(ShipId(1), "b", Faction::SideB, 1);
        actions.perform(&mut a, Some(b.id));
        actions.perform(&mut b, Some(a.id));
        assert_eq!((a.focus_tokens, a.evade_tokens), (1, 0));
        assert_eq!((b.focus_tokens, b.evade_tokens), (0, 1));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(ActionPolicy::parse("Target-Lock"), Some(ActionPolicy::TargetLock));
        assert_eq!(ActionPolicy::parse("lock"), Some(ActionPolicy::TargetLock));
        assert_eq!(ActionPolicy::parse("barrel-roll"), None);
    }

    #[test]
    fn closures_are_pilot_actions() {
        let double_focus = |ship: &mut Ship, _: Option<ShipId>| {
            ship.focus().focus();
        };
        let mut ship = Ship::new(ShipId(0), "a", Faction::SideA, 1);
        double_focus.perform(&mut ship, None);
        assert_eq!(ship.focus_tokens, 2);
    }
}
