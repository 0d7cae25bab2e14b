//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player ship, enemy ships and pickups with the appropriate
//! component bundles, built from the game configuration.

use hecs::{Entity, EntityBuilder, World};

use starfall_ai::profiles::{initial_behavior, snaps_facing, InitialBehavior};
use starfall_combat::targeting::new_slot;
use starfall_combat::vitals::new_vitals;
use starfall_core::components::*;
use starfall_core::config::{GameConfig, MovementConfig, WeaponConfig};
use starfall_core::enums::*;
use starfall_core::types::{Heading, Position, Velocity};
use starfall_progression::ledger::new_ledger;
use starfall_progression::unlocks::refresh_unlocks;

use crate::pickups::{Collectible, Pickup};

/// Category tag carried by the player ship.
pub const PLAYER_TAG: &str = "Player";

fn rigid_body(cfg: &MovementConfig) -> RigidBody {
    RigidBody {
        thrust: cfg.thrust,
        max_speed: cfg.max_speed,
        drag: cfg.drag,
        turn_rate: cfg.turn_rate,
        force: glam::DVec2::ZERO,
    }
}

/// Build an armament from weapon configs. Missing unlock entries default to level 1.
pub fn build_armament(weapons: &[WeaponConfig], unlock_levels: &[u32]) -> Armament {
    Armament {
        slots: weapons.iter().map(new_slot).collect(),
        unlock_levels: (0..weapons.len())
            .map(|i| unlock_levels.get(i).copied().unwrap_or(1))
            .collect(),
        active: None,
    }
}

/// Spawn the player's ship facing +y.
pub fn spawn_player(world: &mut World, config: &GameConfig, ship_id: u32, position: Position) -> Entity {
    let ledger = new_ledger(&config.progression);
    let mut armament = build_armament(&config.loadout.slots, &config.loadout.unlock_levels);
    refresh_unlocks(&mut armament, ledger.level);

    let mut builder = EntityBuilder::new();
    builder
        .add(PlayerShip)
        .add(ShipId(ship_id))
        .add(Faction::Player)
        .add(CategoryTag(PLAYER_TAG.to_string()))
        .add(position)
        .add(Velocity::default())
        .add(Heading(0.0))
        .add(rigid_body(&config.player.movement))
        .add(MotionIntent::default())
        .add(Hull {
            radius: config.player.movement.hull_radius,
        })
        .add(new_vitals(&config.player.vitals))
        .add(armament)
        .add(Trigger::default())
        .add(ledger)
        .add(Collector {
            radius: config.player.collect_radius,
        });
    world.spawn(builder.build())
}

/// Spawn an enemy of `class` facing `heading`.
pub fn spawn_enemy(
    world: &mut World,
    config: &GameConfig,
    ship_id: u32,
    class: ShipClass,
    position: Position,
    heading: f64,
) -> Entity {
    let class_cfg = config.enemies.get(class);

    let mut builder = EntityBuilder::new();
    builder
        .add(EnemyShip { class })
        .add(ShipId(ship_id))
        .add(Faction::Hostile)
        .add(CategoryTag(class.tag().to_string()))
        .add(position)
        .add(Velocity::default())
        .add(Heading(heading))
        .add(rigid_body(&class_cfg.movement))
        .add(MotionIntent {
            snap_facing: snaps_facing(&class_cfg.behavior),
            ..MotionIntent::default()
        })
        .add(Hull {
            radius: class_cfg.movement.hull_radius,
        })
        .add(new_vitals(&class_cfg.vitals))
        .add(build_armament(&class_cfg.weapons, &[]))
        .add(Trigger::default());

    match initial_behavior(&class_cfg.behavior) {
        InitialBehavior::Skirmish(state) => {
            builder.add(state);
        }
        InitialBehavior::Pursuit(state) => {
            builder.add(state);
        }
    }

    world.spawn(builder.build())
}

/// Spawn a collectible lying at `position`.
pub fn spawn_pickup(world: &mut World, collectible: impl Collectible + 'static, position: Position) -> Entity {
    world.spawn((Pickup(Box::new(collectible)), position))
}
