//! Starfall headless runner.
//!
//! Wires the simulation crates into a fixed-rate game loop that can run on
//! its own thread (real time) or flat out for batch runs.

pub mod game_loop;
pub mod scenario;
pub mod state;

pub use starfall_core as core;
