//! Run the default roster once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup

use std::time::Instant;

use dogfight::data::default_roster;
use dogfight::trials::{run_trials, run_trials_sequential, TrialConfig};

fn main() {
    let roster = default_roster();
    let config = TrialConfig {
        trials: 20_000,
        seed: 12345,
        ..TrialConfig::default()
    };

    println!("Monte Carlo: {} trials ({})", config.trials, roster.name);
    println!();

    // Sequential
    let t0 = Instant::now();
    let results_seq = run_trials_sequential(&roster, &config);
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} matches/s)",
        seq_ms,
        config.trials as f64 / elapsed_seq.as_secs_f64()
    );

    // Parallel
    let t0 = Instant::now();
    let results_par = match run_trials(&roster, &config) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("parallel run failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} matches/s)",
        par_ms,
        config.trials as f64 / elapsed_par.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    assert_eq!(results_seq, results_par, "sequential and parallel tallies differ");
    println!("(Results match sequential vs parallel)");
    println!();
    println!("{results_par}");
}
