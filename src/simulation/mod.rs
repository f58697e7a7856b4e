//! Simulation driver: one player's run from first frame to last

pub mod action_select;
pub mod batch;
pub mod tick;

use std::time::Instant;

use crate::core::config::SimSettings;
use crate::core::error::Result;
use crate::economy::EconomyConfig;
use crate::game::Game;
use crate::output::{emit, RunSpec, SimulationOutput, Snapshot, SnapshotSink};

pub use action_select::{choose_action, select_action};
pub use batch::{batch_specs, run_batch, RunFailure};
pub use tick::{run_tick, run_ticks, RunOutcome};

/// Run one player and stream its snapshots into `sink`.
///
/// A final snapshot is emitted when the tick budget runs out.
pub fn simulate_into(
    economy: &EconomyConfig,
    settings: &SimSettings,
    spec: &RunSpec,
    sink: &mut dyn SnapshotSink,
) -> Result<RunOutcome> {
    run(economy, settings, spec, sink).map(|(_, outcome)| outcome)
}

/// Run one player, collecting snapshots and summary statistics
pub fn simulate(economy: &EconomyConfig, settings: &SimSettings, spec: &RunSpec) -> Result<SimulationOutput> {
    let start = Instant::now();
    let mut snapshots: Vec<Snapshot> = Vec::new();
    let (game, outcome) = run(economy, settings, spec, &mut snapshots)?;

    Ok(SimulationOutput::new(
        spec.clone(),
        &game,
        snapshots,
        outcome.ticks,
        outcome.actions,
        start.elapsed(),
    ))
}

fn run<'a>(
    economy: &'a EconomyConfig,
    settings: &'a SimSettings,
    spec: &RunSpec,
    sink: &mut dyn SnapshotSink,
) -> Result<(Game<'a>, RunOutcome)> {
    let span = tracing::info_span!("run", player_id = %spec.player_id, variant = %spec.variant);
    let _enter = span.enter();

    let mut game = Game::new(economy, settings, spec.player_id, spec.seed)?;
    tracing::info!(seed = spec.seed, total_ticks = spec.total_ticks, "Run started");

    let outcome = tick::run_ticks(&mut game, spec.total_ticks, sink)?;
    emit(&mut game, sink);

    tracing::info!(
        ticks = outcome.ticks,
        actions = outcome.actions,
        sessions = game.state.clock.session,
        level = game.player.level,
        "Run finished"
    );
    Ok((game, outcome))
}
