//! Enemy behavior system: runs the skirmisher FSM and the pursuit chase,
//! turning their decisions into motion intents and trigger pulls.

use hecs::World;
use rand::Rng;

use starfall_ai::fsm::{self, SkirmishContext};
use starfall_ai::pursuit::{self, PursuitContext};
use starfall_core::components::*;
use starfall_core::events::SimEvent;
use starfall_core::types::{Heading, Position};

/// Advance every enemy behavior by `dt` seconds.
pub fn run<R: Rng>(
    world: &mut World,
    player: Option<Position>,
    now: f64,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) {
    for (_entity, (id, pos, vitals, state, intent, trigger)) in world.query_mut::<(
        &ShipId,
        &Position,
        &Vitals,
        &mut BehaviorState,
        &mut MotionIntent,
        &mut Trigger,
    )>() {
        if vitals.dead {
            continue;
        }
        let update = fsm::evaluate(
            &SkirmishContext {
                state,
                position: *pos,
                player,
                dt,
            },
            rng,
        );
        if update.mode_changed {
            tracing::debug!(ship = id.0, mode = ?update.state.mode, "behavior mode changed");
            events.push(SimEvent::BehaviorChanged {
                ship: id.0,
                mode: update.state.mode,
            });
        }
        *state = update.state;
        intent.drive = update.drive;
        intent.face_bearing = update.face_bearing;
        trigger.held = update.fire;
    }

    for (_entity, (id, pos, heading, vitals, state, intent, trigger)) in world.query_mut::<(
        &ShipId,
        &Position,
        &Heading,
        &Vitals,
        &mut PursuitState,
        &mut MotionIntent,
        &mut Trigger,
    )>() {
        if vitals.dead {
            continue;
        }
        let update = pursuit::evaluate(&PursuitContext {
            state,
            position: *pos,
            heading: heading.0,
            player,
            now,
            dt,
        });
        if update.phase_changed {
            tracing::debug!(ship = id.0, phase = ?update.state.phase, "pursuit phase changed");
            events.push(SimEvent::PursuitChanged {
                ship: id.0,
                phase: update.state.phase,
            });
        }
        *state = update.state;
        intent.drive = update.drive;
        intent.face_bearing = update.face_bearing;
        trigger.held = update.fire;
    }
}
