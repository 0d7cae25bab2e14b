//! Experience and leveling for Starfall.
//!
//! The ledger accumulates XP and runs the level-up loop against a tier table.
//! Rewards map kill category tags to XP, scaling rescales a ship on each
//! level-up, and unlocks gate weapon slots behind levels.

pub mod ledger;
pub mod rewards;
pub mod scaling;
pub mod unlocks;

pub use starfall_core as core;
