//! Headless Starfall runner.
//!
//! Lays out one wave around the player, lets the autopilot fly, and prints a
//! JSON summary of the fight when it ends.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use starfall_app::game_loop::{self, LoopOptions};
use starfall_app::scenario::{self, Wave};
use starfall_core::config::GameConfig;
use starfall_core::constants::TICK_RATE;
use starfall_sim::SimConfig;

/// Headless Starfall runner
#[derive(Parser, Debug)]
#[command(name = "starfall")]
#[command(about = "Run a Starfall skirmish without a renderer and report the outcome")]
struct Args {
    /// TOML game config; compiled defaults are used when missing
    #[arg(long, default_value = "starfall.toml")]
    config: PathBuf,

    /// RNG seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulation speed multiplier
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Seconds of simulated time before the run is called
    #[arg(long, default_value_t = 120)]
    max_seconds: u64,

    #[arg(long, default_value_t = 4)]
    small: u32,
    #[arg(long, default_value_t = 2)]
    medium: u32,
    #[arg(long, default_value_t = 1)]
    large: u32,

    /// Pace ticks in real time on a background thread
    #[arg(long)]
    realtime: bool,

    /// Leave the player's controls alone
    #[arg(long)]
    no_autopilot: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let game = GameConfig::load_or_default(&args.config);
    let config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        game,
    };
    let wave = Wave {
        small: args.small,
        medium: args.medium,
        large: args.large,
        ..Wave::default()
    };
    let options = LoopOptions {
        max_ticks: args.max_seconds * TICK_RATE as u64,
        autopilot: !args.no_autopilot,
    };

    tracing::info!(seed = args.seed, realtime = args.realtime, "starting starfall");
    let mut engine = scenario::build(config, &wave);

    let summary = if args.realtime {
        let handle = match game_loop::spawn_game_loop(engine, options) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, "failed to spawn game loop thread");
                std::process::exit(1);
            }
        };
        match handle.join.join() {
            Ok(summary) => summary,
            Err(_) => {
                tracing::error!("game loop thread panicked");
                std::process::exit(1);
            }
        }
    } else {
        game_loop::run_headless(&mut engine, &options)
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize run summary"),
    }
}
