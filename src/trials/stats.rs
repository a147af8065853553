use std::fmt;

use serde::Serialize;

use crate::combat::{Faction, MatchResult};

/// Tallies over many matches. Written only by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub side_a_wins: usize,
    pub side_b_wins: usize,
    pub draws: usize,
    /// Draws forced by the round limit; included in `draws`.
    pub round_limit_draws: usize,
    /// Surviving ships summed over the side's wins.
    pub side_a_survivors: usize,
    pub side_b_survivors: usize,
    pub total_rounds: u64,
}

impl AggregateResult {
    pub fn record(&mut self, result: &MatchResult) {
        match result.winner {
            Faction::SideA => {
                self.side_a_wins += 1;
                self.side_a_survivors += result.ships_remaining;
            }
            Faction::SideB => {
                self.side_b_wins += 1;
                self.side_b_survivors += result.ships_remaining;
            }
            Faction::Neutral => {
                self.draws += 1;
                if result.by_round_limit {
                    self.round_limit_draws += 1;
                }
            }
        }
        self.total_rounds += u64::from(result.rounds);
    }

    pub fn total(&self) -> usize {
        self.side_a_wins + self.side_b_wins + self.draws
    }

    pub fn wins(&self, faction: Faction) -> usize {
        match faction {
            Faction::SideA => self.side_a_wins,
            Faction::SideB => self.side_b_wins,
            Faction::Neutral => self.draws,
        }
    }

    /// Share of matches won by `faction` (`Neutral` gives the draw rate).
    pub fn win_rate(&self, faction: Faction) -> f64 {
        ratio(self.wins(faction) as f64, self.total())
    }

    /// Mean ships left when `faction` wins.
    pub fn mean_survivors(&self, faction: Faction) -> f64 {
        let survivors = match faction {
            Faction::SideA => self.side_a_survivors,
            Faction::SideB => self.side_b_survivors,
            Faction::Neutral => 0,
        };
        ratio(survivors as f64, self.wins(faction))
    }

    pub fn mean_rounds(&self) -> f64 {
        ratio(self.total_rounds as f64, self.total())
    }
}

fn ratio(numerator: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Side A wins: {}", self.side_a_wins)?;
        writeln!(f, "Side B wins: {}", self.side_b_wins)?;
        write!(f, "Draws: {}", self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Faction, ships_remaining: usize, rounds: u32) -> MatchResult {
        MatchResult {
            winner,
            ships_remaining,
            rounds,
            by_round_limit: false,
        }
    }

    #[test]
    fn record_tallies_each_outcome() {
        let mut agg = AggregateResult::default();
        agg.record(&result(Faction::SideA, 2, 3));
        agg.record(&result(Faction::SideA, 4, 5));
        agg.record(&result(Faction::SideB, 1, 4));
        agg.record(&MatchResult {
            by_round_limit: true,
            ..result(Faction::Neutral, 0, 100)
        });

        assert_eq!(agg.total(), 4);
        assert_eq!(agg.wins(Faction::SideA), 2);
        assert_eq!(agg.round_limit_draws, 1);
        assert_eq!(agg.win_rate(Faction::SideA), 0.5);
        assert_eq!(agg.mean_survivors(Faction::SideA), 3.0);
        assert_eq!(agg.mean_rounds(), 28.0);
    }

    #[test]
    fn empty_aggregate_has_zero_rates() {
        let agg = AggregateResult::default();
        assert_eq!(agg.win_rate(Faction::SideB), 0.0);
        assert_eq!(agg.mean_survivors(Faction::SideB), 0.0);
    }

    #[test]
    fn display_lists_tallies() {
        let mut agg = AggregateResult::default();
        agg.record(&result(Faction::SideB, 1, 2));
        assert_eq!(agg.to_string(), "Side A wins: 0\nSide B wins: 1\nDraws: 0");
    }
}
