use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::combat::{
    play_match, ActionPolicy, Match, MatchResult, PilotAction, Rng, SideActions, TraceCollector,
    TraceMode, DEFAULT_MAX_ROUNDS,
};
use crate::data::Roster;
use crate::error::TrialError;
use crate::parallel::WorkerPool;
use crate::trials::stats::AggregateResult;

pub const DEFAULT_TRIALS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    pub trials: usize,
    /// Trial `i` is seeded with `seed + i`.
    pub seed: u64,
    pub max_rounds: u32,
    pub actions: SideActions,
    /// 0 uses every core.
    pub workers: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            actions: SideActions::both(ActionPolicy::Focus),
            workers: 0,
        }
    }
}

pub fn trial_seed(base_seed: u64, trial: usize) -> u64 {
    base_seed.wrapping_add(trial as u64)
}

/// Everything one trial mutates: its own ships and its own random stream.
#[derive(Debug, Clone)]
pub struct TrialContext {
    pub game: Match,
    pub rng: Rng,
}

impl TrialContext {
    pub fn new(roster: &Roster, seed: u64) -> Self {
        Self {
            game: roster.new_match(),
            rng: Rng::new(seed),
        }
    }

    pub fn play(&mut self, action: &dyn PilotAction, max_rounds: u32) -> MatchResult {
        let mut trace = TraceCollector::new(TraceMode::Off);
        play_match(&mut self.game, action, &mut self.rng, max_rounds, &mut trace)
    }
}

pub fn run_trial(roster: &Roster, config: &TrialConfig, trial: usize) -> MatchResult {
    let mut context = TrialContext::new(roster, trial_seed(config.seed, trial));
    context.play(&config.actions, config.max_rounds)
}

/// Runs every trial across the worker pool. Workers send results over a
/// channel; one aggregator thread owns the tallies and waits for all of them.
pub fn run_trials(roster: &Roster, config: &TrialConfig) -> Result<AggregateResult, TrialError> {
    let expected = config.trials;
    let started = Instant::now();
    info!(
        trials = expected,
        seed = config.seed,
        workers = config.workers,
        roster = %roster.name,
        "running trials"
    );

    let (tx, rx) = mpsc::channel::<MatchResult>();
    let (produced, aggregated) = thread::scope(|scope| {
        let aggregator = scope.spawn(move || collect_results(rx, expected));
        let produced = WorkerPool::with_workers(config.workers).install(move || {
            (0..expected)
                .into_par_iter()
                .for_each_with(tx, |tx, trial| {
                    let result = run_trial(roster, config, trial);
                    // The aggregator only hangs up after it has every result.
                    let _ = tx.send(result);
                });
        });
        let aggregated = aggregator
            .join()
            .unwrap_or(Err(TrialError::AggregatorPanicked));
        (produced, aggregated)
    });
    produced?;
    let aggregate = aggregated?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        side_a_wins = aggregate.side_a_wins,
        side_b_wins = aggregate.side_b_wins,
        draws = aggregate.draws,
        "trials complete"
    );
    Ok(aggregate)
}

/// Same trials, same seeds, one thread. Produces the same aggregate as [run_trials].
pub fn run_trials_sequential(roster: &Roster, config: &TrialConfig) -> AggregateResult {
    let mut aggregate = AggregateResult::default();
    for trial in 0..config.trials {
        aggregate.record(&run_trial(roster, config, trial));
    }
    aggregate
}

fn collect_results(
    rx: Receiver<MatchResult>,
    expected: usize,
) -> Result<AggregateResult, TrialError> {
    let mut aggregate = AggregateResult::default();
    while aggregate.total() < expected {
        match rx.recv() {
            Ok(result) => {
                debug!(%result, "trial finished");
                aggregate.record(&result);
            }
            Err(_) => {
                return Err(TrialError::MissingResults {
                    expected,
                    received: aggregate.total(),
                })
            }
        }
    }
    Ok(aggregate)
}
