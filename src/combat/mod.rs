pub mod actions;
pub mod dice;
pub mod engine;
pub mod resolver;
pub mod rng;
pub mod ship;
pub mod trace;

pub use actions::{ActionPolicy, PilotAction, SideActions};
pub use dice::{attack_die, defense_die, roll, DiceTally, DieFn, DieResult, FocusUse, DIE_FACES};
pub use engine::{play_match, run_round, Match, MatchResult, DEFAULT_MAX_ROUNDS};
pub use resolver::{
    resolve_attack, AttackOutcome, AttackReroll, DIRECT_HIT_RANGE, DIRECT_HIT_WEIGHT,
};
pub use rng::{RandomSource, Rng, ScriptedRng};
pub use ship::{pair_mut, Faction, Ship, ShipId, Squadron};
pub use trace::{serialize_events_json, CombatEvent, TraceCollector, TraceMode};
