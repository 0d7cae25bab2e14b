//! Weapon system: target upkeep for autonomous slots, trigger-driven fire
//! for manual slots, and projectile spawning.

use hecs::{Entity, World};

use starfall_combat::targeting::{acquire, fire, slot_covers, ShotSpec};
use starfall_core::components::*;
use starfall_core::constants::PROJECTILE_RADIUS;
use starfall_core::enums::{Faction, TargetPolicy, WeaponMode};
use starfall_core::events::SimEvent;
use starfall_core::types::{Heading, Position, Velocity};

/// A live ship that slots may engage.
struct Candidate {
    entity: Entity,
    ship: u32,
    faction: Faction,
    position: Position,
}

/// Run fire control for every armed ship.
pub fn run(world: &mut World, now: f64, policy: TargetPolicy, events: &mut Vec<SimEvent>) {
    let candidates: Vec<Candidate> = world
        .query::<(&ShipId, &Faction, &Position, &Vitals)>()
        .iter()
        .filter(|(_, (_, _, _, vitals))| !vitals.dead)
        .map(|(entity, (id, faction, pos, _))| Candidate {
            entity,
            ship: id.0,
            faction: *faction,
            position: *pos,
        })
        .collect();

    let mut shots: Vec<(Entity, Faction, ShotSpec)> = Vec::new();

    for (entity, (id, faction, pos, heading, vitals, armament, trigger)) in world.query_mut::<(
        &ShipId,
        &Faction,
        &Position,
        &Heading,
        &Vitals,
        &mut Armament,
        Option<&Trigger>,
    )>() {
        if vitals.dead {
            continue;
        }
        let held = trigger.is_some_and(|t| t.held);

        for (index, slot) in armament.slots.iter_mut().enumerate() {
            if !slot.enabled {
                continue;
            }

            let shot = match slot.mode {
                WeaponMode::Manual => {
                    if held {
                        fire(slot, pos, heading.0, vitals, None, now)
                    } else {
                        None
                    }
                }
                WeaponMode::Autonomous => {
                    let current = slot
                        .current_target
                        .and_then(|t| candidates.iter().find(|c| c.entity == t))
                        .filter(|c| slot_covers(&*slot, pos, heading.0, &c.position));

                    let target = match current {
                        Some(c) => Some(c),
                        None => {
                            if slot.current_target.take().is_some() {
                                events.push(SimEvent::TargetLost {
                                    ship: id.0,
                                    slot: index,
                                });
                            }
                            let opponents = candidates
                                .iter()
                                .filter(|c| c.entity != entity && faction.is_opponent_of(c.faction))
                                .map(|c| (c, c.position));
                            let found = acquire(slot, pos, heading.0, opponents, policy);
                            if let Some(c) = found {
                                slot.current_target = Some(c.entity);
                                tracing::debug!(ship = id.0, slot = index, target = c.ship, "target acquired");
                                events.push(SimEvent::TargetAcquired {
                                    ship: id.0,
                                    slot: index,
                                    target: c.ship,
                                });
                            }
                            found
                        }
                    };

                    target.and_then(|c| fire(slot, pos, heading.0, vitals, Some(&c.position), now))
                }
            };

            if let Some(spec) = shot {
                tracing::debug!(ship = id.0, slot = index, damage = spec.damage, "weapon fired");
                events.push(SimEvent::WeaponFired {
                    ship: id.0,
                    slot: index,
                    damage: spec.damage,
                });
                shots.push((entity, *faction, spec));
            }
        }
    }

    for (owner, owner_faction, spec) in shots {
        spawn_projectile(world, owner, owner_faction, &spec);
    }
}

/// Put a projectile into the world from a shot.
pub fn spawn_projectile(world: &mut World, owner: Entity, owner_faction: Faction, spec: &ShotSpec) -> Entity {
    world.spawn((
        Projectile {
            owner,
            owner_faction,
            base_damage: spec.base_damage,
            damage: spec.damage,
            remaining_lifetime: spec.lifetime,
            radius: PROJECTILE_RADIUS,
            spent: false,
        },
        spec.origin,
        Velocity::from_dvec2(spec.velocity),
    ))
}
