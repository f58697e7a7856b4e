//! Zoo Sim - Entry Point
//!
//! Loads an economy and a variant's settings, simulates a batch of players
//! in parallel and writes their snapshots as JSON.

use std::path::PathBuf;

use clap::Parser;
use zoo_sim::core::error::Result;
use zoo_sim::core::types::SECONDS_PER_DAY;
use zoo_sim::economy::loader::load_economy;
use zoo_sim::simulation::{batch_specs, run_batch};
use zoo_sim::{SimSettings, SimulationOutput};

/// Simulate players through the zoo economy
#[derive(Parser, Debug)]
#[command(name = "zoo-sim")]
#[command(about = "Simulate players through a zoo game economy and record their progress")]
struct Args {
    /// Economy tables (TOML)
    #[arg(long, default_value = "data/economy.toml")]
    economy: PathBuf,

    /// Variant settings (TOML)
    #[arg(long, default_value = "data/settings.toml")]
    settings: PathBuf,

    /// Number of players to simulate
    #[arg(long, default_value_t = 1)]
    players: u32,

    /// Simulated seconds per player
    #[arg(long, default_value_t = 7 * SECONDS_PER_DAY)]
    seconds: u64,

    /// Base seed; player N runs with seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write all runs as JSON to this file instead of printing summaries
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Log every action
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "zoo_sim=debug" } else { "zoo_sim=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let economy = load_economy(&args.economy)?;
    let settings = SimSettings::load(&args.settings)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let total_ticks = args.seconds * u64::from(settings.ticks_per_second);

    tracing::info!(
        players = args.players,
        seconds = args.seconds,
        seed,
        variant = %settings.variant_label,
        "Starting batch"
    );

    let specs = batch_specs(args.players, seed, total_ticks, &settings.variant_label);
    let results = run_batch(&economy, &settings, &specs);

    let mut outputs: Vec<SimulationOutput> = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(output) => outputs.push(output),
            Err(failure) => {
                eprintln!("{}", failure);
                failed += 1;
            }
        }
    }

    match &args.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&outputs)?;
            std::fs::write(path, json)?;
            println!("{} runs written to {}", outputs.len(), path.display());
        }
        None => {
            for output in &outputs {
                println!("{}\n", output.summary());
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} runs failed", failed, specs.len());
        std::process::exit(1);
    }
    Ok(())
}
