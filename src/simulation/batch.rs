//! Independent runs in parallel
//!
//! Each run owns its game, RNG and snapshot buffer and only shares the
//! immutable configuration, so runs go straight onto the rayon pool.

use rayon::prelude::*;
use thiserror::Error;

use crate::core::config::SimSettings;
use crate::core::error::SimError;
use crate::core::types::{PlayerId, Tick};
use crate::economy::EconomyConfig;
use crate::output::{RunSpec, SimulationOutput};
use crate::simulation::simulate;

/// A run that stopped early; its siblings are unaffected
#[derive(Debug, Error)]
#[error("run for player {player_id} failed: {error}")]
pub struct RunFailure {
    pub player_id: PlayerId,
    #[source]
    pub error: SimError,
}

/// One spec per player, seeded `base_seed + player id`
pub fn batch_specs(players: u32, base_seed: u64, total_ticks: Tick, variant: &str) -> Vec<RunSpec> {
    (1..=players)
        .map(|id| RunSpec {
            player_id: PlayerId(id),
            variant: variant.to_string(),
            total_ticks,
            seed: base_seed.wrapping_add(u64::from(id)),
        })
        .collect()
}

/// Run every spec, in parallel, returning results in spec order
pub fn run_batch(
    economy: &EconomyConfig,
    settings: &SimSettings,
    specs: &[RunSpec],
) -> Vec<Result<SimulationOutput, RunFailure>> {
    specs
        .par_iter()
        .map(|spec| {
            simulate(economy, settings, spec).map_err(|error| {
                tracing::error!(player_id = %spec.player_id, %error, "Run failed");
                RunFailure {
                    player_id: spec.player_id,
                    error,
                }
            })
        })
        .collect()
}
