//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Raw input
//! mapping happens outside the simulation; these carry already-mapped values.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Ship control ---
    /// Thrust direction (normalised by the engine; zero vector = coast).
    SetThrust { x: f64, y: f64 },
    /// Bearing the ship should turn toward (radians, 0 = +y, clockwise).
    SetAim { bearing: f64 },
    /// Fire signal for the slot under manual control.
    SetTrigger { held: bool },

    // --- Weapons ---
    /// Take manual control of a weapon slot (0-based).
    SelectWeaponSlot { index: usize },

    // --- Simulation control ---
    Pause,
    Resume,
}
