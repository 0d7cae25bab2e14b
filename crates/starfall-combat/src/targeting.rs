//! Weapon slot targeting and fire control.
//!
//! A slot is either driven by its owner's trigger (Manual) or scans for
//! opponents inside its detection range and arc (Autonomous). Both modes are
//! gated by `next_fire_time`.

use glam::DVec2;
use starfall_core::components::{Vitals, WeaponSlot};
use starfall_core::config::WeaponConfig;
use starfall_core::enums::{TargetPolicy, WeaponMode};
use starfall_core::types::{angle_delta, unit_from_bearing, Position};

use crate::vitals::apply_damage_multiplier;

/// Small tolerance so targets sitting exactly on the arc edge still qualify.
const ARC_EPSILON: f64 = 1e-9;

/// Everything the engine needs to spawn a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub origin: Position,
    pub velocity: DVec2,
    pub base_damage: f64,
    pub damage: f64,
    pub lifetime: f64,
}

/// Build a slot from configuration.
pub fn new_slot(cfg: &WeaponConfig) -> WeaponSlot {
    WeaponSlot {
        fire_rate: cfg.fire_rate,
        detection_range: cfg.detection_range,
        detection_angle_deg: cfg.detection_angle_deg,
        next_fire_time: 0.0,
        mode: cfg.mode,
        current_target: None,
        base_damage: cfg.base_damage,
        projectile_speed: cfg.projectile_speed,
        projectile_lifetime: cfg.projectile_lifetime,
        mount_bearing: cfg.mount_bearing_deg.to_radians(),
        aim: cfg.mount_bearing_deg.to_radians(),
        enabled: true,
    }
}

/// Switch a slot's mode. A real switch drops the current target. Returns true if the mode changed.
pub fn activate(slot: &mut WeaponSlot, mode: WeaponMode) -> bool {
    if slot.mode == mode {
        return false;
    }
    tracing::debug!(from = ?slot.mode, to = ?mode, "weapon slot mode changed");
    slot.mode = mode;
    slot.current_target = None;
    true
}

/// Absolute bearing of the slot's arc centre for an owner facing `owner_heading`.
pub fn arc_centre(slot: &WeaponSlot, owner_heading: f64) -> f64 {
    (owner_heading + slot.mount_bearing).rem_euclid(std::f64::consts::TAU)
}

/// True when `target` is within `range` of `origin` and no more than half of
/// `arc_deg` off the `forward_bearing` axis.
pub fn in_range_and_arc(
    origin: &Position,
    forward_bearing: f64,
    range: f64,
    arc_deg: f64,
    target: &Position,
) -> bool {
    let distance = origin.range_to(target);
    if distance > range {
        return false;
    }
    if distance <= f64::EPSILON || arc_deg >= 360.0 {
        return true;
    }
    let off_axis = angle_delta(forward_bearing, origin.bearing_to(target)).abs();
    off_axis <= (arc_deg / 2.0).to_radians() + ARC_EPSILON
}

/// Whether `target` qualifies for this slot given the owner's pose.
pub fn slot_covers(slot: &WeaponSlot, origin: &Position, owner_heading: f64, target: &Position) -> bool {
    in_range_and_arc(
        origin,
        arc_centre(slot, owner_heading),
        slot.detection_range,
        slot.detection_angle_deg,
        target,
    )
}

/// Pick a target among `candidates` (opponent id and position, in scan order).
pub fn acquire<T, I>(
    slot: &WeaponSlot,
    origin: &Position,
    owner_heading: f64,
    candidates: I,
    policy: TargetPolicy,
) -> Option<T>
where
    I: IntoIterator<Item = (T, Position)>,
{
    let mut qualifying = candidates
        .into_iter()
        .filter(|(_, pos)| slot_covers(slot, origin, owner_heading, pos));

    match policy {
        TargetPolicy::FirstInScan => qualifying.next().map(|(id, _)| id),
        TargetPolicy::Nearest => qualifying
            .map(|(id, pos)| (origin.range_to(&pos), id))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id),
    }
}

/// True when the slot is usable and its cooldown has elapsed.
pub fn can_fire(slot: &WeaponSlot, now: f64) -> bool {
    slot.enabled && slot.fire_rate > 0.0 && now >= slot.next_fire_time
}

/// Release one shot if the cooldown allows.
///
/// With a `target` position the weapon body swings to face it; otherwise it
/// aims along its arc centre. Sets `next_fire_time = now + 1 / fire_rate`.
pub fn fire(
    slot: &mut WeaponSlot,
    origin: &Position,
    owner_heading: f64,
    owner: &Vitals,
    target: Option<&Position>,
    now: f64,
) -> Option<ShotSpec> {
    if !can_fire(slot, now) {
        return None;
    }

    slot.aim = match target {
        Some(pos) if origin.range_to(pos) > f64::EPSILON => origin.bearing_to(pos),
        _ => arc_centre(slot, owner_heading),
    };
    slot.next_fire_time = now + 1.0 / slot.fire_rate;

    Some(ShotSpec {
        origin: *origin,
        velocity: unit_from_bearing(slot.aim) * slot.projectile_speed,
        base_damage: slot.base_damage,
        damage: apply_damage_multiplier(owner, slot.base_damage),
        lifetime: slot.projectile_lifetime,
    })
}
