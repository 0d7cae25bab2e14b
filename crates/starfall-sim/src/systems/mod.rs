//! ECS systems that operate on the simulation world.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). They do not own state; all state lives in components. The logic
//! pass runs once per `update`, the physics systems once per fixed step.

pub mod behavior;
pub mod cleanup;
pub mod collisions;
pub mod combat;
pub mod leveling;
pub mod movement;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod vitals;
pub mod weapons;
