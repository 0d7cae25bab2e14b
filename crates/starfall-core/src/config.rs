//! Runtime game configuration loaded from TOML.
//!
//! [`GameConfig`] mirrors the defaults in [`crate::constants`]. Every struct is
//! `#[serde(default)]`, so a file only needs the keys it wants to override.
//! Validation never aborts: [`GameConfig::validate`] returns the list of issues
//! and the engine logs them and degrades.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{PursuitParams, SkirmishParams, TierRange};
use crate::constants::*;
use crate::enums::*;
use crate::error::{ConfigError, ConfigResult};

/// Top-level tuning for a game session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub loadout: LoadoutConfig,
    pub enemies: EnemyRoster,
    pub progression: ProgressionConfig,
    pub targeting: TargetingConfig,
}

/// Health/shield pool parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    pub max_health: f64,
    pub max_shield: f64,
    pub shield_regen_rate: f64,
    pub shield_regen_cooldown: f64,
    pub damage_multiplier: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            max_shield: PLAYER_MAX_SHIELD,
            shield_regen_rate: PLAYER_SHIELD_REGEN_RATE,
            shield_regen_cooldown: PLAYER_SHIELD_REGEN_COOLDOWN,
            damage_multiplier: PLAYER_DAMAGE_MULTIPLIER,
        }
    }
}

/// Rigid-body parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub thrust: f64,
    pub max_speed: f64,
    pub drag: f64,
    /// Radians per second.
    pub turn_rate: f64,
    pub hull_radius: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            thrust: PLAYER_THRUST,
            max_speed: PLAYER_MAX_SPEED,
            drag: PLAYER_DRAG,
            turn_rate: PLAYER_TURN_RATE,
            hull_radius: PLAYER_HULL_RADIUS,
        }
    }
}

/// One weapon hardpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub fire_rate: f64,
    pub detection_range: f64,
    pub detection_angle_deg: f64,
    pub base_damage: f64,
    pub projectile_speed: f64,
    pub projectile_lifetime: f64,
    /// Arc centre relative to the ship's nose, in degrees (clockwise).
    pub mount_bearing_deg: f64,
    pub mode: WeaponMode,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_rate: WEAPON_FIRE_RATE,
            detection_range: WEAPON_DETECTION_RANGE,
            detection_angle_deg: WEAPON_DETECTION_ANGLE_DEG,
            base_damage: PROJECTILE_BASE_DAMAGE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
            mount_bearing_deg: 0.0,
            mode: WeaponMode::Autonomous,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub vitals: VitalsConfig,
    pub movement: MovementConfig,
    pub collect_radius: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            vitals: VitalsConfig::default(),
            movement: MovementConfig::default(),
            collect_radius: PLAYER_COLLECT_RADIUS,
        }
    }
}

/// Player weapon slots and the level each one unlocks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadoutConfig {
    pub slots: Vec<WeaponConfig>,
    pub unlock_levels: Vec<u32>,
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        let forward = WeaponConfig::default();
        let port = WeaponConfig {
            mount_bearing_deg: -90.0,
            ..WeaponConfig::default()
        };
        let starboard = WeaponConfig {
            mount_bearing_deg: 90.0,
            ..WeaponConfig::default()
        };
        Self {
            slots: vec![forward, port, starboard],
            unlock_levels: vec![1, 3, 5],
        }
    }
}

/// Movement behavior assigned to an enemy class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BehaviorConfig {
    Pursuit(PursuitParams),
    Skirmish(SkirmishParams),
}

/// A class override must name its behavior; the other sections fall back to
/// generic defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyClassConfig {
    #[serde(default)]
    pub vitals: VitalsConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
}

/// Tuning for each enemy class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub small: EnemyClassConfig,
    pub medium: EnemyClassConfig,
    pub large: EnemyClassConfig,
}

impl EnemyRoster {
    pub fn get(&self, class: ShipClass) -> &EnemyClassConfig {
        match class {
            ShipClass::Small => &self.small,
            ShipClass::Medium => &self.medium,
            ShipClass::Large => &self.large,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        let enemy_vitals = |max_health, max_shield| VitalsConfig {
            max_health,
            max_shield,
            shield_regen_rate: ENEMY_SHIELD_REGEN_RATE,
            shield_regen_cooldown: ENEMY_SHIELD_REGEN_COOLDOWN,
            damage_multiplier: 1.0,
        };
        // Enemy guns are trigger-driven and fire along the nose. The cooldown
        // must be shorter than the trigger interval or pulses land on a cold gun.
        let nose_gun = |projectile_speed, shoot_interval: f64| WeaponConfig {
            projectile_speed,
            fire_rate: ENEMY_GUN_RATE_FACTOR / shoot_interval,
            mode: WeaponMode::Manual,
            ..WeaponConfig::default()
        };

        let small = EnemyClassConfig {
            vitals: enemy_vitals(SMALL_MAX_HEALTH, SMALL_MAX_SHIELD),
            movement: MovementConfig {
                thrust: SMALL_THRUST,
                max_speed: SMALL_MAX_SPEED,
                drag: SMALL_DRAG,
                turn_rate: SMALL_TURN_RATE,
                hull_radius: SMALL_HULL_RADIUS,
            },
            behavior: BehaviorConfig::Pursuit(PursuitParams {
                reach_threshold: SMALL_REACH_THRESHOLD,
                stop_duration: SMALL_STOP_DURATION,
                shoot_interval: SMALL_SHOOT_INTERVAL,
            }),
            weapons: vec![nose_gun(SMALL_PROJECTILE_SPEED, SMALL_SHOOT_INTERVAL)],
        };

        let medium = EnemyClassConfig {
            vitals: enemy_vitals(MEDIUM_MAX_HEALTH, MEDIUM_MAX_SHIELD),
            movement: MovementConfig {
                max_speed: MEDIUM_RANDOM_FLY_SPEED,
                hull_radius: MEDIUM_HULL_RADIUS,
                ..MovementConfig::default()
            },
            behavior: BehaviorConfig::Skirmish(SkirmishParams {
                strafe_speed: MEDIUM_STRAFE_SPEED,
                random_fly_speed: MEDIUM_RANDOM_FLY_SPEED,
                strafe_time: MEDIUM_STRAFE_TIME,
                random_fly_time: MEDIUM_RANDOM_FLY_TIME,
                shoot_interval: MEDIUM_SHOOT_INTERVAL,
            }),
            weapons: vec![
                nose_gun(PROJECTILE_SPEED, MEDIUM_SHOOT_INTERVAL),
                nose_gun(PROJECTILE_SPEED, MEDIUM_SHOOT_INTERVAL),
            ],
        };

        let large = EnemyClassConfig {
            vitals: enemy_vitals(LARGE_MAX_HEALTH, LARGE_MAX_SHIELD),
            movement: MovementConfig {
                max_speed: LARGE_RANDOM_FLY_SPEED,
                hull_radius: LARGE_HULL_RADIUS,
                ..MovementConfig::default()
            },
            behavior: BehaviorConfig::Skirmish(SkirmishParams {
                strafe_speed: LARGE_STRAFE_SPEED,
                random_fly_speed: LARGE_RANDOM_FLY_SPEED,
                strafe_time: LARGE_STRAFE_TIME,
                random_fly_time: LARGE_RANDOM_FLY_TIME,
                shoot_interval: LARGE_SHOOT_INTERVAL,
            }),
            // Quarter turrets acquire the player on their own.
            weapons: vec![
                nose_gun(PROJECTILE_SPEED, LARGE_SHOOT_INTERVAL),
                WeaponConfig {
                    mount_bearing_deg: -45.0,
                    detection_angle_deg: 180.0,
                    ..WeaponConfig::default()
                },
                WeaponConfig {
                    mount_bearing_deg: 45.0,
                    detection_angle_deg: 180.0,
                    ..WeaponConfig::default()
                },
            ],
        };

        Self {
            small,
            medium,
            large,
        }
    }
}

/// Multipliers applied to the leveling ship on every level-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUpScaling {
    pub max_health_factor: f64,
    /// Restore health to the new maximum.
    pub full_heal: bool,
    pub fire_rate_factor: f64,
    /// Applied to the outgoing damage multiplier.
    pub damage_factor: f64,
}

impl Default for LevelUpScaling {
    fn default() -> Self {
        Self {
            max_health_factor: LEVEL_UP_MAX_HEALTH_FACTOR,
            full_heal: true,
            fire_rate_factor: LEVEL_UP_FIRE_RATE_FACTOR,
            damage_factor: LEVEL_UP_DAMAGE_FACTOR,
        }
    }
}

/// XP granted per category tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardTable(pub BTreeMap<String, f64>);

impl Default for RewardTable {
    fn default() -> Self {
        let mut rewards = BTreeMap::new();
        rewards.insert(ShipClass::Small.tag().to_string(), SMALL_ENEMY_XP);
        rewards.insert(ShipClass::Medium.tag().to_string(), MEDIUM_ENEMY_XP);
        rewards.insert(ShipClass::Large.tag().to_string(), LARGE_ENEMY_XP);
        Self(rewards)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub initial_xp_cap: f64,
    pub tiers: Vec<TierRange>,
    pub rewards: RewardTable,
    pub scaling: LevelUpScaling,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_xp_cap: INITIAL_XP_CAP,
            tiers: vec![
                TierRange {
                    start: 1,
                    end: 10,
                    cap_increase: DEFAULT_CAP_INCREASE,
                },
                TierRange {
                    start: 11,
                    end: 20,
                    cap_increase: DEFAULT_CAP_INCREASE * 2.0,
                },
                TierRange {
                    start: 21,
                    end: u32::MAX,
                    cap_increase: DEFAULT_CAP_INCREASE * 4.0,
                },
            ],
            rewards: RewardTable::default(),
            scaling: LevelUpScaling::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub policy: TargetPolicy,
}

impl GameConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, falling back to defaults when the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded game config");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file; using compiled defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load config; using defaults");
                Self::default()
            }
        }
    }

    /// Collect every configuration issue. An empty list means the config is clean.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = validate_tiers(&self.progression.tiers);

        if self.progression.initial_xp_cap <= 0.0 {
            issues.push(ConfigError::NonPositiveXpCap {
                value: self.progression.initial_xp_cap,
            });
        }

        if self.loadout.slots.len() != self.loadout.unlock_levels.len() {
            issues.push(ConfigError::UnlockLengthMismatch {
                slots: self.loadout.slots.len(),
                unlocks: self.loadout.unlock_levels.len(),
            });
        }

        for (i, slot) in self.loadout.slots.iter().enumerate() {
            check_fire_rate(&mut issues, format!("player slot {i}"), slot.fire_rate);
        }
        for class in [ShipClass::Small, ShipClass::Medium, ShipClass::Large] {
            for (i, slot) in self.enemies.get(class).weapons.iter().enumerate() {
                check_fire_rate(&mut issues, format!("{} slot {i}", class.tag()), slot.fire_rate);
            }
        }

        issues
    }
}

fn check_fire_rate(issues: &mut Vec<ConfigError>, context: String, value: f64) {
    if value <= 0.0 {
        issues.push(ConfigError::NonPositiveFireRate { context, value });
    }
}

/// Check a tier table for emptiness, inverted rows and overlaps.
pub fn validate_tiers(tiers: &[TierRange]) -> Vec<ConfigError> {
    let mut issues = Vec::new();
    if tiers.is_empty() {
        issues.push(ConfigError::EmptyTierTable);
        return issues;
    }

    for tier in tiers {
        if tier.start > tier.end {
            issues.push(ConfigError::InvertedTier {
                start: tier.start,
                end: tier.end,
            });
        }
    }

    for (i, a) in tiers.iter().enumerate() {
        for b in &tiers[i + 1..] {
            if a.start <= b.end && b.start <= a.end {
                issues.push(ConfigError::OverlappingTiers {
                    first_start: a.start,
                    first_end: a.end,
                    second_start: b.start,
                    second_end: b.end,
                });
            }
        }
    }

    issues
}
