//! Skirmisher behavior finite state machine.
//!
//! Pure functions that advance the Strafe/RandomFly machine by one logic
//! tick. No ECS dependency; operates on plain data and an injected RNG.

use glam::DVec2;
use rand::Rng;
use starfall_core::components::{BehaviorState, Drive, SkirmishParams};
use starfall_core::enums::BehaviorMode;
use starfall_core::types::{unit_from_bearing, Position};

/// Input to the skirmisher FSM for a single ship.
pub struct SkirmishContext<'a> {
    pub state: &'a BehaviorState,
    pub position: Position,
    /// Player position, if the player is alive.
    pub player: Option<Position>,
    pub dt: f64,
}

/// Output from the skirmisher FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct SkirmishUpdate {
    pub state: BehaviorState,
    pub drive: Drive,
    pub face_bearing: Option<f64>,
    /// Pull the trigger this tick.
    pub fire: bool,
    pub mode_changed: bool,
}

/// Fresh machine in Strafe with full timers.
pub fn new_state(params: SkirmishParams) -> BehaviorState {
    BehaviorState {
        params,
        mode: BehaviorMode::Strafe,
        mode_timer: params.strafe_time,
        chosen_direction: DVec2::ZERO,
        shoot_timer: params.shoot_interval,
    }
}

/// Seconds a mode lasts before flipping.
pub fn mode_duration(params: &SkirmishParams, mode: BehaviorMode) -> f64 {
    match mode {
        BehaviorMode::Strafe => params.strafe_time,
        BehaviorMode::RandomFly => params.random_fly_time,
    }
}

/// Draw a uniformly distributed unit direction.
pub fn random_direction<R: Rng>(rng: &mut R) -> DVec2 {
    unit_from_bearing(rng.gen_range(0.0..std::f64::consts::TAU))
}

/// Advance the machine by `ctx.dt` seconds.
pub fn evaluate<R: Rng>(ctx: &SkirmishContext, rng: &mut R) -> SkirmishUpdate {
    let params = ctx.state.params;
    let mut state = ctx.state.clone();

    state.mode_timer = (state.mode_timer - ctx.dt).max(0.0);
    let mode_changed = state.mode_timer <= 0.0;
    if mode_changed {
        state.mode = match state.mode {
            BehaviorMode::Strafe => BehaviorMode::RandomFly,
            BehaviorMode::RandomFly => BehaviorMode::Strafe,
        };
        state.mode_timer = mode_duration(&params, state.mode);
        state.chosen_direction = match state.mode {
            BehaviorMode::RandomFly => random_direction(rng),
            BehaviorMode::Strafe => DVec2::ZERO,
        };
    }

    // Trigger pulls run on their own clock, independent of the mode timer.
    state.shoot_timer -= ctx.dt;
    let fire = state.shoot_timer <= 0.0;
    if fire {
        state.shoot_timer = params.shoot_interval;
    }

    let to_player = ctx.player.map(|p| ctx.position.direction_to(&p));
    let face_bearing = match (ctx.player, to_player) {
        (Some(p), Some(dir)) if dir != DVec2::ZERO => Some(ctx.position.bearing_to(&p)),
        _ => None,
    };

    let drive = match state.mode {
        BehaviorMode::Strafe => match to_player {
            Some(dir) => Drive::Velocity(dir.perp() * params.strafe_speed),
            None => Drive::Coast,
        },
        BehaviorMode::RandomFly => Drive::Velocity(state.chosen_direction * params.random_fly_speed),
    };

    SkirmishUpdate {
        state,
        drive,
        face_bearing,
        fire,
        mode_changed,
    }
}
