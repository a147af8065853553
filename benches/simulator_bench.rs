//! Simulator throughput benchmarks: single attacks and whole matches.
//!
//! Run with: `cargo bench --bench simulator`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use dogfight::combat::{
    play_match, resolve_attack, ActionPolicy, Faction, Rng, Ship, ShipId, TraceCollector,
    TraceMode, DEFAULT_MAX_ROUNDS,
};
use dogfight::data::default_roster;

fn x_wing() -> Ship {
    let mut ship = Ship::new(ShipId(0), "X-wing", Faction::SideA, 8);
    ship.attack = 3;
    ship.defense = 2;
    ship.hull = 3;
    ship.shields = 2;
    ship
}

fn tie_fighter() -> Ship {
    let mut ship = Ship::new(ShipId(1), "TIE fighter", Faction::SideB, 1);
    ship.attack = 2;
    ship.defense = 3;
    ship.hull = 3;
    ship
}

fn bench_simulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    group.bench_function("resolve_attack", |b| {
        let mut rng = Rng::new(7);
        b.iter_batched(
            || {
                let mut attacker = x_wing();
                attacker.focus();
                (attacker, tie_fighter())
            },
            |(mut a, mut d)| black_box(resolve_attack(&mut a, &mut d, &mut rng)),
            BatchSize::SmallInput,
        );
    });

    let roster = default_roster();
    group.bench_function("default_roster_match", |b| {
        let mut rng = Rng::new(7);
        b.iter_batched(
            || roster.new_match(),
            |mut game| {
                let mut trace = TraceCollector::new(TraceMode::Off);
                black_box(play_match(
                    &mut game,
                    &ActionPolicy::Focus,
                    &mut rng,
                    DEFAULT_MAX_ROUNDS,
                    &mut trace,
                ))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_simulator);
criterion_main!(benches);
