//! Benchmarks for full runs and single ticks over the sample data

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zoo_sim::core::types::{PlayerId, SECONDS_PER_DAY};
use zoo_sim::economy::loader::load_economy;
use zoo_sim::game::Game;
use zoo_sim::output::Snapshot;
use zoo_sim::simulation::{batch_specs, run_batch, run_tick, simulate, RunOutcome};
use zoo_sim::{EconomyConfig, RunSpec, SimSettings};

fn sample_data() -> (EconomyConfig, SimSettings) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let economy = load_economy(&root.join("economy.toml")).expect("sample economy");
    let settings = SimSettings::load(&root.join("settings.toml")).expect("sample settings");
    (economy, settings)
}

fn bench_single_day(c: &mut Criterion) {
    let (economy, settings) = sample_data();
    let spec = RunSpec {
        player_id: PlayerId(1),
        variant: settings.variant_label.clone(),
        total_ticks: SECONDS_PER_DAY * u64::from(settings.ticks_per_second),
        seed: 42,
    };

    c.bench_function("simulate_one_day", |b| {
        b.iter(|| simulate(black_box(&economy), black_box(&settings), black_box(&spec)))
    });
}

fn bench_online_ticks(c: &mut Criterion) {
    let (economy, settings) = sample_data();

    c.bench_function("run_tick_1000_online", |b| {
        b.iter(|| {
            let mut game = Game::new(&economy, &settings, PlayerId(1), 7).expect("game");
            game.state.clock.session_online = u64::MAX;
            let mut sink: Vec<Snapshot> = Vec::new();
            let mut outcome = RunOutcome::default();
            let mut now = 0;
            while now < 1_000 {
                now += run_tick(&mut game, now, &mut sink, &mut outcome).expect("tick");
            }
            black_box(outcome)
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let (economy, settings) = sample_data();
    let specs = batch_specs(
        8,
        1,
        SECONDS_PER_DAY * u64::from(settings.ticks_per_second),
        &settings.variant_label,
    );

    c.bench_function("batch_8_players_one_day", |b| {
        b.iter(|| run_batch(black_box(&economy), black_box(&settings), black_box(&specs)))
    });
}

criterion_group!(benches, bench_single_day, bench_online_ticks, bench_batch);
criterion_main!(benches);
