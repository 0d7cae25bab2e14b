//! Contact detection between projectiles and opposing hulls.
//!
//! Runs after every physics step. Contacts are only recorded here; the combat
//! system resolves them serially during the next logic pass.

use hecs::{Entity, World};

use starfall_core::components::{Hull, Projectile, Vitals};
use starfall_core::enums::Faction;
use starfall_core::types::Position;

/// A projectile touching a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Impact {
    pub projectile: Entity,
    pub target: Entity,
}

/// Record the first opposing hull each unspent projectile overlaps.
pub fn detect(world: &World, impacts: &mut Vec<Impact>) {
    let hulls: Vec<(Entity, Faction, Position, f64)> = world
        .query::<(&Faction, &Position, &Hull, &Vitals)>()
        .iter()
        .filter(|(_, (_, _, _, vitals))| !vitals.dead)
        .map(|(entity, (faction, pos, hull, _))| (entity, *faction, *pos, hull.radius))
        .collect();

    for (entity, (projectile, pos)) in world.query::<(&Projectile, &Position)>().iter() {
        if projectile.spent || impacts.iter().any(|i| i.projectile == entity) {
            continue;
        }
        let hit = hulls.iter().find(|(_, faction, hull_pos, radius)| {
            projectile.owner_faction.is_opponent_of(*faction)
                && pos.range_to(hull_pos) <= projectile.radius + radius
        });
        if let Some((target, ..)) = hit {
            impacts.push(Impact {
                projectile: entity,
                target: *target,
            });
        }
    }
}
