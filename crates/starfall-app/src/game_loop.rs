//! Game loop: ticks the simulation engine at the nominal tick rate and keeps
//! a running summary of the fight.
//!
//! `spawn_game_loop` runs in real time on its own thread and takes commands
//! over an `mpsc` channel. `run_headless` ticks flat out on the caller's
//! thread for batch runs.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use starfall_core::constants::TICK_RATE;
use starfall_core::enums::GamePhase;
use starfall_core::state::GameStateSnapshot;
use starfall_sim::SimulationEngine;

use crate::scenario::autopilot;
use crate::state::{GameLoopCommand, LoopHandle, RunSummary, StopReason};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks between status log lines.
const STATUS_INTERVAL: u64 = TICK_RATE as u64 * 5;

/// Ticks between autopilot decisions.
const AUTOPILOT_INTERVAL: u64 = 10;

/// Knobs shared by both loop flavours.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks.
    pub max_ticks: u64,
    /// Steer the player from the snapshot stream.
    pub autopilot: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: TICK_RATE as u64 * 120,
            autopilot: true,
        }
    }
}

/// Advance one tick and fold the result into `summary`.
/// Returns the snapshot and, if the run is over, why.
fn step(
    engine: &mut SimulationEngine,
    summary: &mut RunSummary,
    options: &LoopOptions,
) -> (GameStateSnapshot, Option<StopReason>) {
    let snapshot = engine.tick();
    let player_ship = snapshot.player.as_ref().map(|p| p.ship);
    summary.record(&snapshot, player_ship);

    for event in &snapshot.events {
        tracing::trace!(?event, "sim event");
    }

    if snapshot.time.tick > 0 && snapshot.time.tick % STATUS_INTERVAL == 0 {
        tracing::info!(
            tick = snapshot.time.tick,
            enemies = snapshot.ships.len(),
            kills = summary.kills,
            level = summary.level,
            health = summary.player_health,
            "status"
        );
    }

    if options.autopilot && snapshot.time.tick % AUTOPILOT_INTERVAL == 0 {
        for command in autopilot(&snapshot) {
            engine.queue_command(command);
        }
    }

    let stop = if snapshot.phase == GamePhase::GameOver {
        Some(StopReason::PlayerDestroyed)
    } else if snapshot.ships.is_empty() {
        Some(StopReason::FieldCleared)
    } else if snapshot.time.tick >= options.max_ticks {
        Some(StopReason::TickLimit)
    } else {
        None
    };
    (snapshot, stop)
}

fn finish(mut summary: RunSummary, reason: StopReason) -> RunSummary {
    summary.stop_reason = reason;
    tracing::info!(
        ?reason,
        ticks = summary.ticks,
        kills = summary.kills,
        level = summary.level,
        "run finished"
    );
    summary
}

/// Tick as fast as possible until the run ends.
pub fn run_headless(engine: &mut SimulationEngine, options: &LoopOptions) -> RunSummary {
    let mut summary = RunSummary::default();
    loop {
        let (_snapshot, stop) = step(engine, &mut summary, options);
        if let Some(reason) = stop {
            return finish(summary, reason);
        }
    }
}

/// Spawn the real-time game loop on a new thread.
pub fn spawn_game_loop(engine: SimulationEngine, options: LoopOptions) -> std::io::Result<LoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let join = std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, &shared, &options))?;

    Ok(LoopHandle {
        command_tx,
        latest_snapshot,
        join,
    })
}

/// The real-time loop. Runs until the fight ends, a Shutdown command, or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: &LoopOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return finish(summary, StopReason::Shutdown);
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        let (snapshot, stop) = step(&mut engine, &mut summary, options);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
        if let Some(reason) = stop {
            return finish(summary, reason);
        }

        // 4. Sleep until the next tick, adjusting for time scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            tracing::debug!("game loop behind; resetting tick clock");
            next_tick_time = now;
        }
    }
}
