//! Combat rules for Starfall.
//!
//! Damage mitigation, shield regeneration and weapon targeting as pure
//! functions over the plain-data components in `starfall-core`. No ECS
//! dependency; the engine's systems feed these functions and apply results.

pub mod targeting;
pub mod vitals;

pub use starfall_core as core;

#[cfg(test)]
mod tests;
