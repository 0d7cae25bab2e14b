//! Projectile lifetime system.

use hecs::{Entity, World};

use starfall_core::components::{Dead, Projectile};

/// Count down projectile lifetimes and mark expired ones for removal.
pub fn run(world: &mut World, dt: f64) {
    let mut expired: Vec<Entity> = Vec::new();
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.remaining_lifetime -= dt;
        if projectile.remaining_lifetime <= 0.0 && !projectile.spent {
            expired.push(entity);
        }
    }
    for entity in expired {
        let _ = world.insert_one(entity, Dead);
    }
}
