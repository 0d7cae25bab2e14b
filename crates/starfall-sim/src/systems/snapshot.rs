//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use starfall_combat::vitals::{health_fraction, shield_fraction};
use starfall_core::components::*;
use starfall_core::enums::*;
use starfall_core::events::SimEvent;
use starfall_core::state::*;
use starfall_core::types::{Heading, Position, SimTime};
use starfall_progression::unlocks::unlock_level;

use crate::pickups::Pickup;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: Option<Entity>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        player: player.and_then(|p| build_player(world, p)),
        ships: build_ships(world),
        projectile_count: world.query::<&Projectile>().iter().count(),
        pickup_count: world.query::<&Pickup>().iter().count(),
        events,
    }
}

fn build_player(world: &World, player: Entity) -> Option<PlayerView> {
    let id = world.get::<&ShipId>(player).ok()?;
    let pos = world.get::<&Position>(player).ok()?;
    let heading = world.get::<&Heading>(player).ok()?;
    let vitals = world.get::<&Vitals>(player).ok()?;
    let ledger = world.get::<&ProgressionLedger>(player).ok();
    let armament = world.get::<&Armament>(player).ok();

    let slots = armament
        .as_deref()
        .map(|a| {
            a.slots
                .iter()
                .enumerate()
                .map(|(index, slot)| SlotView {
                    index,
                    mode: slot.mode,
                    enabled: slot.enabled,
                    unlock_level: unlock_level(a, index),
                    fire_rate: slot.fire_rate,
                    has_target: slot.current_target.is_some(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(PlayerView {
        ship: id.0,
        position: *pos,
        heading: heading.0,
        health: vitals.health,
        max_health: vitals.max_health,
        shield: vitals.shield,
        max_shield: vitals.max_shield,
        level: ledger.as_deref().map_or(1, |l| l.level),
        xp: ledger.as_deref().map_or(0.0, |l| l.xp),
        xp_cap: ledger.as_deref().map_or(0.0, |l| l.xp_cap),
        active_slot: armament.as_deref().and_then(|a| a.active),
        slots,
    })
}

fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(
            &EnemyShip,
            &ShipId,
            &Position,
            &Heading,
            &Vitals,
            Option<&BehaviorState>,
            Option<&PursuitState>,
        )>()
        .iter()
        .map(|(_, (enemy, id, pos, heading, vitals, behavior, pursuit))| ShipView {
            ship: id.0,
            class: enemy.class,
            position: *pos,
            heading: heading.0,
            health_fraction: health_fraction(vitals),
            shield_fraction: shield_fraction(vitals),
            behavior: behavior.map(|b| b.mode),
            pursuit: pursuit.map(|p| p.phase),
        })
        .collect();

    ships.sort_by_key(|s| s.ship);
    ships
}
