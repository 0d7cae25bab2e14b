//! Simulation constants and tuning parameters.
//!
//! These are the compiled defaults behind [`crate::config::GameConfig`]. Any of
//! them can be overridden from a TOML file without recompiling.

/// Logic tick rate (Hz) used by `SimulationEngine::tick`.
pub const TICK_RATE: u32 = 60;

/// Seconds per logic tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Fixed physics step rate (Hz).
pub const PHYSICS_RATE: u32 = 50;

/// Seconds per physics step.
pub const PHYSICS_DT: f64 = 1.0 / PHYSICS_RATE as f64;

/// Upper bound on physics steps per `update` call, so a long stall cannot spiral.
pub const MAX_PHYSICS_STEPS_PER_UPDATE: u32 = 8;

// --- Player vitals ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_MAX_SHIELD: f64 = 50.0;
/// Shield points restored per second once the regen cooldown has elapsed.
pub const PLAYER_SHIELD_REGEN_RATE: f64 = 5.0;
/// Seconds after the last hit before the shield starts regenerating.
pub const PLAYER_SHIELD_REGEN_COOLDOWN: f64 = 3.0;
pub const PLAYER_DAMAGE_MULTIPLIER: f64 = 1.0;

// --- Player movement ---

pub const PLAYER_THRUST: f64 = 10.0;
pub const PLAYER_MAX_SPEED: f64 = 5.0;
/// Linear drag coefficient (fraction of velocity removed per second).
pub const PLAYER_DRAG: f64 = 0.9;
/// Turn rate toward the aim bearing (radians per second, 180 deg/s).
pub const PLAYER_TURN_RATE: f64 = std::f64::consts::PI;
pub const PLAYER_HULL_RADIUS: f64 = 0.5;
/// Radius within which the player picks up collectibles.
pub const PLAYER_COLLECT_RADIUS: f64 = 2.0;

// --- Weapons ---

pub const WEAPON_FIRE_RATE: f64 = 1.0;
pub const WEAPON_DETECTION_RANGE: f64 = 10.0;
/// Full detection arc in degrees.
pub const WEAPON_DETECTION_ANGLE_DEG: f64 = 90.0;
pub const PROJECTILE_BASE_DAMAGE: f64 = 10.0;
pub const PROJECTILE_SPEED: f64 = 10.0;
/// Seconds before an unspent projectile despawns.
pub const PROJECTILE_LIFETIME: f64 = 5.0;
pub const PROJECTILE_RADIUS: f64 = 0.1;

// --- Enemy: small (pursuit) ---

pub const SMALL_MAX_HEALTH: f64 = 30.0;
pub const SMALL_MAX_SHIELD: f64 = 0.0;
pub const SMALL_THRUST: f64 = 5.0;
pub const SMALL_MAX_SPEED: f64 = 3.0;
pub const SMALL_DRAG: f64 = 0.9;
/// Turn rate toward the player while seeking (radians per second).
pub const SMALL_TURN_RATE: f64 = 5.0;
/// Distance at which a chaser counts as having reached the player.
pub const SMALL_REACH_THRESHOLD: f64 = 1.0;
/// Seconds spent overshooting before seeking again.
pub const SMALL_STOP_DURATION: f64 = 2.0;
pub const SMALL_SHOOT_INTERVAL: f64 = 2.0;
pub const SMALL_PROJECTILE_SPEED: f64 = 8.0;
pub const SMALL_HULL_RADIUS: f64 = 0.4;

// --- Enemy: medium (skirmisher) ---

pub const MEDIUM_MAX_HEALTH: f64 = 60.0;
pub const MEDIUM_MAX_SHIELD: f64 = 20.0;
pub const MEDIUM_STRAFE_SPEED: f64 = 3.0;
pub const MEDIUM_RANDOM_FLY_SPEED: f64 = 5.0;
/// Seconds spent strafing before breaking off.
pub const MEDIUM_STRAFE_TIME: f64 = 3.0;
/// Seconds spent flying a random direction.
pub const MEDIUM_RANDOM_FLY_TIME: f64 = 2.0;
pub const MEDIUM_SHOOT_INTERVAL: f64 = 1.0;
pub const MEDIUM_HULL_RADIUS: f64 = 0.6;

// --- Enemy: large (turreted skirmisher) ---

pub const LARGE_MAX_HEALTH: f64 = 150.0;
pub const LARGE_MAX_SHIELD: f64 = 75.0;
pub const LARGE_STRAFE_SPEED: f64 = 1.5;
pub const LARGE_RANDOM_FLY_SPEED: f64 = 2.5;
pub const LARGE_STRAFE_TIME: f64 = 4.0;
pub const LARGE_RANDOM_FLY_TIME: f64 = 2.0;
pub const LARGE_SHOOT_INTERVAL: f64 = 1.5;
pub const LARGE_HULL_RADIUS: f64 = 1.0;

/// Enemy nose guns fire at this multiple of `1 / shoot_interval`, so every
/// trigger pulse finds the gun ready.
pub const ENEMY_GUN_RATE_FACTOR: f64 = 2.0;

/// Shared enemy shield regen parameters.
pub const ENEMY_SHIELD_REGEN_RATE: f64 = 2.0;
pub const ENEMY_SHIELD_REGEN_COOLDOWN: f64 = 4.0;

// --- Progression ---

/// XP required for the first level-up.
pub const INITIAL_XP_CAP: f64 = 100.0;
/// Cap increase applied on every level-up inside the default tier.
pub const DEFAULT_CAP_INCREASE: f64 = 50.0;
/// Smallest XP cap the ledger will accept; guards the level-up loop.
pub const MIN_XP_CAP: f64 = 1.0;

pub const SMALL_ENEMY_XP: f64 = 10.0;
pub const MEDIUM_ENEMY_XP: f64 = 25.0;
pub const LARGE_ENEMY_XP: f64 = 50.0;

/// Per-level multipliers applied on every level-up.
pub const LEVEL_UP_MAX_HEALTH_FACTOR: f64 = 1.05;
pub const LEVEL_UP_FIRE_RATE_FACTOR: f64 = 1.05;
pub const LEVEL_UP_DAMAGE_FACTOR: f64 = 1.025;

// --- Pickups ---

pub const EXP_GEM_XP: f64 = 5.0;
