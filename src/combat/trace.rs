//! Optional event trace for a single match. Off for Monte Carlo runs.

use serde::Serialize;

use crate::combat::resolver::AttackOutcome;
use crate::combat::ship::{Faction, ShipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Off,
    Events,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Attack {
        round: u32,
        attacker: ShipId,
        attacker_name: String,
        defender: ShipId,
        defender_name: String,
        #[serde(flatten)]
        outcome: AttackOutcome,
    },
    ShipDestroyed {
        round: u32,
        ship: ShipId,
        name: String,
        faction: Faction,
    },
    RoundEnded {
        round: u32,
        side_a_remaining: usize,
        side_b_remaining: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TraceCollector {
    mode: TraceMode,
    events: Vec<CombatEvent>,
}

impl TraceCollector {
    pub fn new(mode: TraceMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mode == TraceMode::Events
    }

    /// Builds the event only when tracing is on.
    pub fn record(&mut self, event: impl FnOnce() -> CombatEvent) {
        if self.is_enabled() {
            self.events.push(event());
        }
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }
}

pub fn serialize_events_json(events: &[CombatEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_mode_never_builds_events() {
        let mut trace = TraceCollector::new(TraceMode::Off);
        trace.record(|| unreachable!("event built while tracing is off"));
        assert!(trace.events().is_empty());
    }

    #[test]
    fn events_serialize_with_tag() {
        let mut trace = TraceCollector::new(TraceMode::Events);
        trace.record(|| CombatEvent::RoundEnded {
            round: 2,
            side_a_remaining: 1,
            side_b_remaining: 0,
        });
        let json = serialize_events_json(trace.events()).expect("events serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["event"], "round_ended");
        assert_eq!(value[0]["side_b_remaining"], 0);
    }
}
