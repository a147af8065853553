pub mod monte_carlo;
pub mod stats;

pub use monte_carlo::{
    run_trial, run_trials, run_trials_sequential, trial_seed, TrialConfig, TrialContext,
    DEFAULT_TRIALS,
};
pub use stats::AggregateResult;
