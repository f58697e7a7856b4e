//! Zoo Sim - player simulation for a collect-and-merge zoo economy
//!
//! One simulated player earns cash from socketed animals, buys and merges
//! candies, feeds animals, opens crates and eggs, and comes and goes across
//! many sessions. Each run is driven by a single seeded RNG, so the same
//! seed and configuration always produce the same snapshots.

pub mod core;
pub mod economy;
pub mod game;
pub mod output;
pub mod player;
pub mod session;
pub mod simulation;

pub use crate::core::config::SimSettings;
pub use crate::core::error::{ConfigError, Result, SimError};
pub use economy::EconomyConfig;
pub use output::{RunSpec, SimulationOutput, Snapshot, SnapshotSink};
pub use simulation::{run_batch, simulate, simulate_into};
