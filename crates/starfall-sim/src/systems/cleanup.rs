//! Cleanup system: despawns destroyed entities and clears every weapon slot
//! target that pointed at one of them.

use hecs::{Entity, World};

use starfall_core::components::{Armament, Dead, ShipId};
use starfall_core::events::SimEvent;

/// Remove all entities marked `Dead`. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) {
    despawn_buffer.clear();

    for (entity, _dead) in world.query_mut::<&Dead>() {
        despawn_buffer.push(entity);
    }
    if despawn_buffer.is_empty() {
        return;
    }

    for entity in despawn_buffer.iter() {
        let _ = world.despawn(*entity);
    }

    // Weak references: no slot may keep a handle to a despawned entity.
    for (_entity, (id, armament)) in world.query_mut::<(&ShipId, &mut Armament)>() {
        for (index, slot) in armament.slots.iter_mut().enumerate() {
            if slot.current_target.is_some_and(|t| despawn_buffer.contains(&t)) {
                slot.current_target = None;
                events.push(SimEvent::TargetLost {
                    ship: id.0,
                    slot: index,
                });
            }
        }
    }

    despawn_buffer.clear();
}
