//! Kinematic integration system, run once per fixed physics step.
//!
//! Ships turn toward their intended facing (bounded by `turn_rate` unless the
//! intent snaps), apply their drive, shed speed to drag and integrate
//! position. Projectiles fly ballistically.

use glam::DVec2;
use hecs::World;

use starfall_core::components::{Drive, MotionIntent, Projectile, RigidBody};
use starfall_core::types::{angle_delta, Heading, Position, Velocity};

/// Advance every body by one step of `dt` seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, heading, body, intent)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Heading,
        &mut RigidBody,
        &MotionIntent,
    )>() {
        steer(heading, body, intent, dt);
        let v = apply_drive(vel.as_dvec2(), body, intent.drive, dt);
        *vel = Velocity::from_dvec2(v);
        *pos = Position::from_dvec2(pos.as_dvec2() + v * dt);
    }

    for (_entity, (pos, vel, _projectile)) in world.query_mut::<(&mut Position, &Velocity, &Projectile)>() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}

/// Rotate `current` toward `target` by at most `max_step` radians.
pub fn turn_toward(current: f64, target: f64, max_step: f64) -> f64 {
    let delta = angle_delta(current, target);
    let step = delta.clamp(-max_step, max_step);
    (current + step).rem_euclid(std::f64::consts::TAU)
}

fn steer(heading: &mut Heading, body: &RigidBody, intent: &MotionIntent, dt: f64) {
    let Some(target) = intent.face_bearing else {
        return;
    };
    heading.0 = if intent.snap_facing {
        target.rem_euclid(std::f64::consts::TAU)
    } else {
        turn_toward(heading.0, target, body.turn_rate * dt)
    };
}

/// New velocity after one step of `drive`.
pub fn apply_drive(velocity: DVec2, body: &mut RigidBody, drive: Drive, dt: f64) -> DVec2 {
    body.force = DVec2::ZERO;
    match drive {
        Drive::Velocity(v) => v,
        Drive::Thrust(direction) => {
            body.force = direction.normalize_or_zero() * body.thrust;
            let v = (velocity + body.force * dt).clamp_length_max(body.max_speed);
            apply_drag(v, body.drag, dt)
        }
        Drive::Coast => apply_drag(velocity, body.drag, dt),
    }
}

fn apply_drag(velocity: DVec2, drag: f64, dt: f64) -> DVec2 {
    velocity * (1.0 - drag * dt).max(0.0)
}
