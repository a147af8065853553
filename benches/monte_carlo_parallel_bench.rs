//! Compare sequential vs parallel trial run times.
//!
//! Run with: `cargo bench --bench monte_carlo_parallel`
//! Or quick comparison: `cargo run --bin benchmark_parallel_speedup` (see src/bin)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dogfight::data::default_roster;
use dogfight::trials::{run_trials, run_trials_sequential, TrialConfig};

fn bench_trials_sequential_vs_parallel(c: &mut Criterion) {
    let roster = default_roster();
    let config = TrialConfig {
        trials: 2000,
        seed: 42,
        ..TrialConfig::default()
    };

    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_trials_sequential(&roster, &config)));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_trials(&roster, &config).expect("trials complete")));
    });

    group.finish();
}

criterion_group!(benches, bench_trials_sequential_vs_parallel);
criterion_main!(benches);
