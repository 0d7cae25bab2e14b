//! Chase behavior for small hulls.
//!
//! Seek the player by turning and thrusting along the nose. On reaching the
//! player, keep flying straight through until a resume time, then seek again.

use starfall_core::components::{Drive, PursuitParams, PursuitState};
use starfall_core::enums::PursuitPhase;
use starfall_core::types::{unit_from_bearing, Position};

/// Input to the pursuit behavior for a single ship.
pub struct PursuitContext<'a> {
    pub state: &'a PursuitState,
    pub position: Position,
    /// Current heading (radians).
    pub heading: f64,
    pub player: Option<Position>,
    pub now: f64,
    pub dt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PursuitUpdate {
    pub state: PursuitState,
    pub drive: Drive,
    pub face_bearing: Option<f64>,
    pub fire: bool,
    pub phase_changed: bool,
}

pub fn new_state(params: PursuitParams) -> PursuitState {
    PursuitState {
        params,
        phase: PursuitPhase::Seek,
        resume_at: 0.0,
        shoot_timer: params.shoot_interval,
    }
}

/// Advance the chase by one logic tick.
pub fn evaluate(ctx: &PursuitContext) -> PursuitUpdate {
    let params = ctx.state.params;
    let mut state = ctx.state.clone();
    let previous = state.phase;

    if state.phase == PursuitPhase::PassThrough && ctx.now >= state.resume_at {
        state.phase = PursuitPhase::Seek;
    }

    let forward = unit_from_bearing(ctx.heading);
    let (drive, face_bearing) = match (state.phase, ctx.player) {
        (PursuitPhase::Seek, Some(player)) => {
            if ctx.position.range_to(&player) <= params.reach_threshold {
                state.phase = PursuitPhase::PassThrough;
                state.resume_at = ctx.now + params.stop_duration;
                (Drive::Thrust(forward), None)
            } else {
                (Drive::Thrust(forward), Some(ctx.position.bearing_to(&player)))
            }
        }
        (PursuitPhase::PassThrough, _) => (Drive::Thrust(forward), None),
        (PursuitPhase::Seek, None) => (Drive::Coast, None),
    };

    state.shoot_timer -= ctx.dt;
    let fire = state.shoot_timer <= 0.0 && ctx.player.is_some();
    if state.shoot_timer <= 0.0 {
        state.shoot_timer = params.shoot_interval;
    }

    PursuitUpdate {
        phase_changed: state.phase != previous,
        state,
        drive,
        face_bearing,
        fire,
    }
}
