//! Shield regeneration system.

use hecs::World;

use starfall_combat::vitals::regen_tick;
use starfall_core::components::Vitals;

pub fn run(world: &mut World, dt: f64, now: f64) {
    for (_entity, vitals) in world.query_mut::<&mut Vitals>() {
        regen_tick(vitals, dt, now);
    }
}
