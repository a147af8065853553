//! Resolution of one ship attacking another: rolls, rerolls, token spends,
//! cancellation and damage.
//!
//! The sequence is fixed and never loops back. Given the same random source
//! state it always produces the same outcome.

use serde::Serialize;
use tracing::trace;

use crate::combat::dice::{attack_die, defense_die, roll, DiceTally, FocusUse};
use crate::combat::rng::RandomSource;
use crate::combat::ship::Ship;

/// Chance a crit on the hull is a direct hit: `DIRECT_HIT_WEIGHT` in `DIRECT_HIT_RANGE`.
pub const DIRECT_HIT_WEIGHT: u32 = 7;
pub const DIRECT_HIT_RANGE: u32 = 33;

/// Which attack reroll fired, if any. At most one fires per attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackReroll {
    /// No focus token, lock on this defender: every blank and focus.
    LockAllMisses,
    /// No focus token, squad bonus: one blank or focus.
    SquadOneMiss,
    /// Holding focus, lock on this defender: blanks only.
    LockBlanks,
    /// Holding focus, squad bonus: one blank.
    SquadOneBlank,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttackOutcome {
    /// Attack tally after rerolls and focus, before cancellation.
    pub attack: DiceTally,
    /// Defense tally after token spends, before cancellation.
    pub defense: DiceTally,
    pub reroll: Option<AttackReroll>,
    pub evaded: bool,
    pub hits_canceled: u32,
    pub crits_canceled: u32,
    pub shield_damage: u32,
    pub hull_damage: u32,
    pub direct_hits: u32,
    pub destroyed: bool,
}

fn choose_reroll(attacker: &Ship, defender: &Ship, tally: &DiceTally) -> Option<AttackReroll> {
    let locked_on_defender = attacker.locked_onto == Some(defender.id);
    if attacker.focus_tokens == 0 {
        if tally.blanks > 0 && locked_on_defender {
            Some(AttackReroll::LockAllMisses)
        } else if attacker.has_squad_reroll && (tally.blanks > 0 || tally.focuses > 0) {
            Some(AttackReroll::SquadOneMiss)
        } else {
            None
        }
    } else if tally.blanks > 0 {
        if locked_on_defender {
            Some(AttackReroll::LockBlanks)
        } else if attacker.has_squad_reroll {
            Some(AttackReroll::SquadOneBlank)
        } else {
            None
        }
    } else {
        None
    }
}

/// Resolve one attack from `attacker` against `defender`, mutating both.
///
/// The defender must still be in play; the attacker may have been destroyed
/// earlier in the same priority level, since ships at one level fire simultaneously.
pub fn resolve_attack<R: RandomSource>(
    attacker: &mut Ship,
    defender: &mut Ship,
    rng: &mut R,
) -> AttackOutcome {
    assert!(
        defender.is_alive(),
        "{} attacked destroyed ship {}",
        attacker.name,
        defender.name
    );
    trace!(attacker = %attacker, defender = %defender, "attack");

    let mut outcome = AttackOutcome::default();
    let mut attack = roll(attacker.attack, attack_die, rng);
    trace!(%attack, "attack roll");

    outcome.reroll = choose_reroll(attacker, defender, &attack);
    match outcome.reroll {
        Some(AttackReroll::LockAllMisses) => {
            attack.reroll_blanks_and_focuses(attack_die, rng);
            attacker.spend_target_lock();
        }
        Some(AttackReroll::SquadOneMiss) => {
            attack.reroll_one_blank_or_focus(attack_die, rng);
        }
        Some(AttackReroll::LockBlanks) => {
            attack.reroll_blanks(attack_die, rng);
            attacker.spend_target_lock();
        }
        Some(AttackReroll::SquadOneBlank) => {
            attack.reroll_one_blank(attack_die, rng);
        }
        None => {}
    }
    if let Some(kind) = outcome.reroll {
        trace!(?kind, %attack, "attack reroll");
    }

    if attack.focuses > 0 && attacker.focus_tokens > 0 {
        attack.spend_focus(FocusUse::Attack);
        attacker.spend_focus_token();
        trace!(%attack, "attacker spent focus");
    }
    outcome.attack = attack;
    let total_hits = attack.damage();

    let mut defense = roll(defender.defense, defense_die, rng);
    trace!(%defense, "defense roll");
    if defense.evades >= total_hits {
        trace!("evaded naturally");
        outcome.defense = defense;
        outcome.evaded = true;
        return outcome;
    }

    if defense.focuses > 0 && defender.focus_tokens > 0 {
        defense.spend_focus(FocusUse::Defense);
        defender.spend_focus_token();
        trace!(%defense, "defender spent focus");
    }
    while defense.evades < total_hits && defender.evade_tokens > 0 {
        defense.spend_evade();
        defender.spend_evade_token();
        trace!(%defense, "defender spent evade token");
    }
    outcome.defense = defense;
    if defense.evades >= total_hits {
        trace!("evaded after spending tokens");
        outcome.evaded = true;
        return outcome;
    }

    // Hits are canceled before crits.
    let mut evades = defense.evades;
    outcome.hits_canceled = attack.hits.min(evades);
    attack.hits -= outcome.hits_canceled;
    evades -= outcome.hits_canceled;
    outcome.crits_canceled = attack.crits.min(evades);
    attack.crits -= outcome.crits_canceled;

    // Shields soak hits first, then crits only once every hit has landed on them.
    let shield_hits = attack.hits.min(defender.shields);
    attack.hits -= shield_hits;
    defender.shields -= shield_hits;
    let mut shield_crits = 0;
    if attack.hits == 0 && defender.shields > 0 {
        shield_crits = attack.crits.min(defender.shields);
        attack.crits -= shield_crits;
        defender.shields -= shield_crits;
    }
    outcome.shield_damage = shield_hits + shield_crits;

    let mut hull_damage = attack.hits;
    for _ in 0..attack.crits {
        if rng.next_below(DIRECT_HIT_RANGE) < DIRECT_HIT_WEIGHT {
            outcome.direct_hits += 1;
            hull_damage += 2;
        } else {
            hull_damage += 1;
        }
    }
    defender.hull -= hull_damage as i32;
    outcome.hull_damage = hull_damage;
    trace!(
        shields = outcome.shield_damage,
        hull = outcome.hull_damage,
        direct_hits = outcome.direct_hits,
        "damage applied"
    );

    if defender.hull < 1 {
        defender.destroyed = true;
        outcome.destroyed = true;
        trace!(defender = %defender.name, "destroyed");
    }
    outcome
}
