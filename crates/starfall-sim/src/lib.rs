//! Simulation engine for Starfall.
//!
//! Owns the hecs ECS world, runs the logic pass and fixed-rate physics steps,
//! resolves combat and progression, and produces GameStateSnapshots.

pub mod engine;
pub mod pickups;
pub mod slots;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starfall_core as core;

#[cfg(test)]
mod tests;
