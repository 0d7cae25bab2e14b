//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the combat, ai and
//! progression crates and in the engine's systems.

use glam::DVec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Health and shield pool of a ship.
///
/// `health` is left raw after a lethal hit (it can read below zero); UI code
/// should use the clamped fractions from the combat crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub max_health: f64,
    pub health: f64,
    pub max_shield: f64,
    pub shield: f64,
    /// Shield restored per second once the cooldown has elapsed.
    pub shield_regen_rate: f64,
    /// Seconds after the last hit before regeneration resumes.
    pub shield_regen_cooldown: f64,
    /// Simulation time of the most recent damage application.
    pub last_damage_at: f64,
    /// Multiplier on outgoing projectile damage.
    pub damage_multiplier: f64,
    /// Latched by the first lethal hit.
    pub dead: bool,
}

/// One weapon hardpoint.
#[derive(Debug, Clone)]
pub struct WeaponSlot {
    /// Shots per second. Must be positive for the slot to fire.
    pub fire_rate: f64,
    pub detection_range: f64,
    /// Full detection arc in degrees, centred on the mount axis.
    pub detection_angle_deg: f64,
    /// Earliest simulation time the slot may fire again.
    pub next_fire_time: f64,
    pub mode: WeaponMode,
    /// Weak reference to the engaged opponent. Cleared when it dies or leaves the arc.
    pub current_target: Option<Entity>,
    pub base_damage: f64,
    pub projectile_speed: f64,
    pub projectile_lifetime: f64,
    /// Arc centre relative to the owner's heading (radians).
    pub mount_bearing: f64,
    /// Absolute bearing the weapon body currently points along.
    pub aim: f64,
    /// False while the slot is locked behind an unlock level.
    pub enabled: bool,
}

/// All weapon slots carried by a ship.
#[derive(Debug, Clone, Default)]
pub struct Armament {
    pub slots: Vec<WeaponSlot>,
    /// Level required to use each slot (parallel to `slots`).
    pub unlock_levels: Vec<u32>,
    /// Index of the slot currently under manual control.
    pub active: Option<usize>,
}

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Ship that fired it; the reward for a kill is routed here.
    pub owner: Entity,
    pub owner_faction: Faction,
    /// Slot damage before the owner's multiplier.
    pub base_damage: f64,
    /// Damage dealt on contact, fixed at spawn.
    pub damage: f64,
    pub remaining_lifetime: f64,
    pub radius: f64,
    /// Set once the projectile has applied its damage.
    pub spent: bool,
}

/// Construction-time parameters of the skirmisher behavior machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkirmishParams {
    pub strafe_speed: f64,
    pub random_fly_speed: f64,
    pub strafe_time: f64,
    pub random_fly_time: f64,
    /// Seconds between trigger pulls, independent of the mode timer.
    pub shoot_interval: f64,
}

/// Runtime state of the skirmisher behavior machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorState {
    pub params: SkirmishParams,
    pub mode: BehaviorMode,
    /// Seconds left in the current mode.
    pub mode_timer: f64,
    /// Direction drawn on entry to RandomFly.
    pub chosen_direction: DVec2,
    /// Seconds until the next trigger pull.
    pub shoot_timer: f64,
}

/// Construction-time parameters of the pursuit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuitParams {
    /// Distance at which the chaser counts as having reached the player.
    pub reach_threshold: f64,
    /// Seconds to keep flying straight after reaching the player.
    pub stop_duration: f64,
    pub shoot_interval: f64,
}

/// Runtime state of the pursuit behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuitState {
    pub params: PursuitParams,
    pub phase: PursuitPhase,
    /// Simulation time at which pass-through ends.
    pub resume_at: f64,
    pub shoot_timer: f64,
}

/// One row of the XP tier table: levels `start..=end` grow the cap by `cap_increase`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRange {
    pub start: u32,
    pub end: u32,
    pub cap_increase: f64,
}

/// Experience ledger of a leveling entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionLedger {
    pub level: u32,
    pub xp: f64,
    pub xp_cap: f64,
    /// Checked in order; the first range containing the new level wins.
    pub tiers: Vec<TierRange>,
}

/// Kinematic body parameters plus the force accumulated this physics step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub thrust: f64,
    pub max_speed: f64,
    /// Fraction of velocity shed per second.
    pub drag: f64,
    /// Maximum heading change (radians per second).
    pub turn_rate: f64,
    pub force: DVec2,
}

/// How the physics step should drive a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Drive {
    /// No input; drag only.
    #[default]
    Coast,
    /// Apply `direction × thrust` as force, then clamp to max speed.
    Thrust(DVec2),
    /// Set velocity directly.
    Velocity(DVec2),
}

/// Movement decision produced by input or AI each logic tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionIntent {
    pub drive: Drive,
    /// Bearing to turn toward (limited by `turn_rate`), if any.
    pub face_bearing: Option<f64>,
    /// Snap straight to `face_bearing` instead of turning gradually.
    pub snap_facing: bool,
}

/// Category tag looked up by the reward table (e.g. "SmallEnemy").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag(pub String);

/// Stable ship number used in events and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// External fire signal. Held by player input, pulsed by AI shoot timers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Trigger {
    pub held: bool,
}

/// Pickup collection radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collector {
    pub radius: f64,
}

/// Collision radius of a ship hull.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub radius: f64,
}

/// Hull class of an enemy ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShip {
    pub class: ShipClass,
}

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks an entity whose removal is pending at the end of this logic tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dead;
