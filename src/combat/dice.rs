//! Eight-sided attack and defense dice and the mutable tally a roll produces.

use std::fmt;

use serde::Serialize;

use crate::combat::rng::RandomSource;

/// Faces on the eight-sided dice.
pub const DIE_FACES: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DieResult {
    Blank,
    Focus,
    Hit,
    Crit,
    Evade,
}

/// A die: maps one uniform draw to a face.
pub type DieFn<R> = fn(&mut R) -> DieResult;

/// Attack die: 2 blank, 2 focus, 3 hit, 1 crit.
pub fn attack_die<R: RandomSource>(rng: &mut R) -> DieResult {
    match rng.next_below(DIE_FACES) {
        0..=1 => DieResult::Blank,
        2..=3 => DieResult::Focus,
        4..=6 => DieResult::Hit,
        _ => DieResult::Crit,
    }
}

/// Defense die: 3 blank, 2 focus, 3 evade.
pub fn defense_die<R: RandomSource>(rng: &mut R) -> DieResult {
    match rng.next_below(DIE_FACES) {
        0..=2 => DieResult::Blank,
        3..=4 => DieResult::Focus,
        _ => DieResult::Evade,
    }
}

/// What spent focus results turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusUse {
    Attack,
    Defense,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiceTally {
    pub hits: u32,
    pub crits: u32,
    pub evades: u32,
    pub focuses: u32,
    pub blanks: u32,
}

/// Roll `count` dice through `die`.
pub fn roll<R: RandomSource>(count: u32, die: DieFn<R>, rng: &mut R) -> DiceTally {
    let mut tally = DiceTally::default();
    for _ in 0..count {
        tally.record(die(rng));
    }
    tally
}

impl DiceTally {
    pub fn total(&self) -> u32 {
        self.hits + self.crits + self.evades + self.focuses + self.blanks
    }

    /// Hits plus crits.
    pub fn damage(&self) -> u32 {
        self.hits + self.crits
    }

    pub fn record(&mut self, face: DieResult) {
        match face {
            DieResult::Blank => self.blanks += 1,
            DieResult::Focus => self.focuses += 1,
            DieResult::Hit => self.hits += 1,
            DieResult::Crit => self.crits += 1,
            DieResult::Evade => self.evades += 1,
        }
    }

    pub fn merge(&mut self, other: DiceTally) -> &mut Self {
        self.hits += other.hits;
        self.crits += other.crits;
        self.evades += other.evades;
        self.focuses += other.focuses;
        self.blanks += other.blanks;
        self
    }

    pub fn reroll_blanks<R: RandomSource>(&mut self, die: DieFn<R>, rng: &mut R) -> &mut Self {
        if self.blanks == 0 {
            return self;
        }
        let count = std::mem::take(&mut self.blanks);
        self.merge(roll(count, die, rng))
    }

    pub fn reroll_blanks_and_focuses<R: RandomSource>(
        &mut self,
        die: DieFn<R>,
        rng: &mut R,
    ) -> &mut Self {
        let count = self.blanks + self.focuses;
        if count == 0 {
            return self;
        }
        self.blanks = 0;
        self.focuses = 0;
        self.merge(roll(count, die, rng))
    }

    pub fn reroll_one_blank<R: RandomSource>(&mut self, die: DieFn<R>, rng: &mut R) -> &mut Self {
        if self.blanks == 0 {
            return self;
        }
        self.blanks -= 1;
        self.merge(roll(1, die, rng))
    }

    /// Rerolls a blank when there is one, otherwise a focus.
    pub fn reroll_one_blank_or_focus<R: RandomSource>(
        &mut self,
        die: DieFn<R>,
        rng: &mut R,
    ) -> &mut Self {
        if self.blanks > 0 {
            return self.reroll_one_blank(die, rng);
        }
        if self.focuses == 0 {
            return self;
        }
        self.focuses -= 1;
        self.merge(roll(1, die, rng))
    }

    pub fn spend_focus(&mut self, on: FocusUse) -> &mut Self {
        let focuses = std::mem::take(&mut self.focuses);
        match on {
            FocusUse::Attack => self.hits += focuses,
            FocusUse::Defense => self.evades += focuses,
        }
        self
    }

    pub fn spend_evade(&mut self) -> &mut Self {
        self.evades += 1;
        self
    }
}

impl fmt::Display for DiceTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<DiceTally {} hits, {} crits, {} evades, {} focuses, {} blanks>",
            self.hits, self.crits, self.evades, self.focuses, self.blanks
        )
    }
}
