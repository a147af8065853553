//! Round-based match engine: priority ordering, targeting, squad rerolls and
//! end-of-match detection.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::combat::actions::PilotAction;
use crate::combat::resolver::resolve_attack;
use crate::combat::rng::RandomSource;
use crate::combat::ship::{pair_mut, Faction, Ship, ShipId, Squadron};
use crate::combat::trace::{CombatEvent, TraceCollector};

/// Rounds after which a match is called a draw. Real rosters end long before this.
pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// `Faction::Neutral` when nobody won.
    pub winner: Faction,
    pub ships_remaining: usize,
    pub rounds: u32,
    /// Draw forced by the round limit rather than mutual destruction.
    pub by_round_limit: bool,
}

impl MatchResult {
    pub fn is_draw(&self) -> bool {
        self.winner == Faction::Neutral
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Faction::Neutral if self.by_round_limit => {
                write!(f, "draw (round limit {})", self.rounds)
            }
            Faction::Neutral => write!(f, "draw"),
            side => write!(
                f,
                "{} with {} ships remaining",
                side.label(),
                self.ships_remaining
            ),
        }
    }
}

/// One trial's ships and squadrons. Owns everything the match mutates.
#[derive(Debug, Clone)]
pub struct Match {
    ships: Vec<Ship>,
    side_a: Squadron,
    side_b: Squadron,
    /// Distinct priorities present, highest first.
    priorities: Vec<i32>,
    round: u32,
}

impl Match {
    /// Ship ids must equal their position in `ships`.
    pub fn new(ships: Vec<Ship>) -> Self {
        for (index, ship) in ships.iter().enumerate() {
            assert_eq!(ship.id, ShipId(index), "ship arena ids out of order");
        }
        let side_a = Squadron::new(Faction::SideA, &ships);
        let side_b = Squadron::new(Faction::SideB, &ships);
        let mut priorities: Vec<i32> = ships.iter().map(|s| s.priority).collect();
        priorities.sort_unstable_by(|a, b| b.cmp(a));
        priorities.dedup();
        Self {
            ships,
            side_a,
            side_b,
            priorities,
            round: 0,
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        &self.ships[id.0]
    }

    pub fn ship_mut(&mut self, id: ShipId) -> &mut Ship {
        &mut self.ships[id.0]
    }

    pub fn squadron(&self, faction: Faction) -> &Squadron {
        match faction {
            Faction::SideB => &self.side_b,
            _ => &self.side_a,
        }
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn survivors(&self, faction: Faction) -> usize {
        self.squadron(faction)
            .members()
            .iter()
            .filter(|id| self.ships[id.0].is_alive())
            .count()
    }

    /// First living ship in the squadron's priority order.
    pub fn first_target(&self, faction: Faction) -> Option<ShipId> {
        self.squadron(faction)
            .members()
            .iter()
            .copied()
            .find(|id| self.ships[id.0].is_alive())
    }

    /// Squad reroll bonus goes to every non-granting ship of a faction while
    /// one of its granters is alive.
    fn refresh_squad_rerolls(&mut self) {
        for faction in [Faction::SideA, Faction::SideB] {
            let granter_alive = self
                .ships
                .iter()
                .any(|s| s.faction == faction && s.grants_squad_reroll && s.is_alive());
            for ship in self.ships.iter_mut().filter(|s| s.faction == faction) {
                if !ship.grants_squad_reroll {
                    ship.has_squad_reroll = granter_alive;
                }
            }
        }
    }

    fn activation_list(&self, priority: i32) -> Vec<ShipId> {
        self.side_a
            .members()
            .iter()
            .chain(self.side_b.members())
            .copied()
            .filter(|id| {
                let ship = &self.ships[id.0];
                ship.priority == priority && ship.is_alive()
            })
            .collect()
    }

    fn outcome(&self) -> Option<MatchResult> {
        let side_a = self.survivors(Faction::SideA);
        let side_b = self.survivors(Faction::SideB);
        let (winner, ships_remaining) = match (side_a, side_b) {
            (a, b) if a > 0 && b > 0 => return None,
            (a, _) if a > 0 => (Faction::SideA, a),
            (_, b) if b > 0 => (Faction::SideB, b),
            _ => (Faction::Neutral, 0),
        };
        Some(MatchResult {
            winner,
            ships_remaining,
            rounds: self.round,
            by_round_limit: false,
        })
    }
}

/// Play one combat round. Returns the result once at most one side has ships left.
pub fn run_round<R: RandomSource>(
    game: &mut Match,
    action: &dyn PilotAction,
    rng: &mut R,
    trace: &mut TraceCollector,
) -> Option<MatchResult> {
    game.round += 1;
    let round = game.round;

    for level in game.priorities.clone() {
        game.refresh_squad_rerolls();

        // Gathered before anyone fires: ships at one level shoot simultaneously.
        for id in game.activation_list(level) {
            let faction = game.ships[id.0].faction;
            let target = game.first_target(faction.opponent());

            action.perform(game.ship_mut(id), target);

            // No early exit without a target: a same-level exchange can still end in a draw.
            let Some(target) = target else {
                continue;
            };
            let (attacker, defender) = pair_mut(&mut game.ships, id, target);
            let outcome = resolve_attack(attacker, defender, rng);
            let destroyed = outcome.destroyed;
            trace.record(|| CombatEvent::Attack {
                round,
                attacker: attacker.id,
                attacker_name: attacker.name.clone(),
                defender: defender.id,
                defender_name: defender.name.clone(),
                outcome,
            });
            if destroyed {
                debug!(round, ship = %defender.name, by = %attacker.name, "ship destroyed");
                trace.record(|| CombatEvent::ShipDestroyed {
                    round,
                    ship: defender.id,
                    name: defender.name.clone(),
                    faction: defender.faction,
                });
            }
        }
    }

    for ship in &mut game.ships {
        ship.clean_up();
    }

    let side_a_remaining = game.survivors(Faction::SideA);
    let side_b_remaining = game.survivors(Faction::SideB);
    debug!(round, side_a_remaining, side_b_remaining, "round complete");
    trace.record(|| CombatEvent::RoundEnded {
        round,
        side_a_remaining,
        side_b_remaining,
    });
    game.outcome()
}

/// Play rounds until one side is eliminated or `max_rounds` forces a draw.
pub fn play_match<R: RandomSource>(
    game: &mut Match,
    action: &dyn PilotAction,
    rng: &mut R,
    max_rounds: u32,
    trace: &mut TraceCollector,
) -> MatchResult {
    if let Some(result) = game.outcome() {
        return result;
    }
    while game.round < max_rounds {
        if let Some(result) = run_round(game, action, rng, trace) {
            return result;
        }
    }
    tracing::warn!(max_rounds, "match hit the round limit, scoring a draw");
    MatchResult {
        winner: Faction::Neutral,
        ships_remaining: 0,
        rounds: game.round,
        by_round_limit: true,
    }
}
