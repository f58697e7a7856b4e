//! Run output and serialization

pub mod snapshot;

use std::time::Duration;

use serde::Serialize;

use crate::core::types::{PlayerId, Tick};
use crate::game::Game;
use crate::player::currency::Currency;
pub use snapshot::{emit, Snapshot, SnapshotSink};

/// Parameters of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSpec {
    pub player_id: PlayerId,
    pub variant: String,
    pub total_ticks: Tick,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub ticks_simulated: Tick,
    pub simulation_time_ms: u64,
    pub sessions: u32,
    pub days: u32,
    pub final_level: u32,
    pub final_cash: u64,
    /// Final cash in display form, e.g. `1.25M`
    pub final_cash_label: String,
    pub animals_owned: usize,
    pub sets_completed: usize,
    pub actions: u64,
    pub snapshot_count: usize,
}

/// Complete output of one run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub run: RunSpec,
    pub snapshots: Vec<Snapshot>,
    pub statistics: RunStats,
}

impl SimulationOutput {
    pub fn new(
        run: RunSpec,
        game: &Game,
        snapshots: Vec<Snapshot>,
        ticks: Tick,
        actions: u64,
        elapsed: Duration,
    ) -> Self {
        let final_cash = game.player.balance(Currency::Cash);
        let statistics = RunStats {
            ticks_simulated: ticks,
            simulation_time_ms: elapsed.as_millis() as u64,
            sessions: game.state.clock.session,
            days: game.state.clock.day,
            final_level: game.player.level,
            final_cash,
            final_cash_label: game.economy.format_amount(final_cash),
            animals_owned: game.player.inventory.owned_count(),
            sets_completed: game.completed_set_count(),
            actions,
            snapshot_count: snapshots.len(),
        };

        Self {
            run,
            snapshots,
            statistics,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "Player {} ({}): {} sessions over {} days in {}ms\nlevel {}, {} cash, {} animals, {} sets complete, {} actions",
            self.run.player_id,
            self.run.variant,
            self.statistics.sessions,
            self.statistics.days,
            self.statistics.simulation_time_ms,
            self.statistics.final_level,
            self.statistics.final_cash_label,
            self.statistics.animals_owned,
            self.statistics.sets_completed,
            self.statistics.actions,
        )
    }
}
