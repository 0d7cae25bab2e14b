//! Pickup system: collectors sweep up collectibles within their radius.

use hecs::{Entity, World};

use starfall_core::components::{Collector, Dead, Vitals};
use starfall_core::config::LevelUpScaling;
use starfall_core::events::SimEvent;
use starfall_core::types::Position;

use super::leveling;
use crate::pickups::{CollectContext, Pickup};

pub fn run(world: &mut World, scaling: &LevelUpScaling, events: &mut Vec<SimEvent>) {
    let collectors: Vec<(Entity, Position, f64)> = world
        .query::<(&Position, &Collector, &Vitals)>()
        .iter()
        .filter(|(_, (_, _, vitals))| !vitals.dead)
        .map(|(entity, (pos, collector, _))| (entity, *pos, collector.radius))
        .collect();
    if collectors.is_empty() {
        return;
    }

    let lying: Vec<(Entity, Position)> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect();

    let mut taken: Vec<Entity> = Vec::new();
    for (collector, collector_pos, radius) in collectors {
        for (pickup, pickup_pos) in &lying {
            if taken.contains(pickup) || collector_pos.range_to(pickup_pos) > radius {
                continue;
            }

            let (kind, xp_gained) = {
                let Ok(item) = world.get::<&Pickup>(*pickup) else {
                    continue;
                };
                let mut vitals = world.get::<&mut Vitals>(collector).ok();
                let mut ctx = CollectContext {
                    vitals: vitals.as_deref_mut(),
                    xp_gained: 0.0,
                };
                item.0.collect(&mut ctx);
                (item.0.kind(), ctx.xp_gained)
            };

            taken.push(*pickup);
            tracing::debug!(kind, "pickup collected");
            events.push(SimEvent::PickupCollected {
                kind: kind.to_string(),
            });
            if xp_gained > 0.0 {
                leveling::award_xp(world, collector, xp_gained, kind, scaling, events);
            }
        }
    }

    for entity in taken {
        let _ = world.insert_one(entity, Dead);
    }
}
