//! Game state snapshot: the visible state handed to UI consumers each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub ships: Vec<ShipView>,
    pub projectile_count: usize,
    pub pickup_count: usize,
    pub events: Vec<SimEvent>,
}

/// Player ship status for HUD bars and the level readout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub ship: u32,
    pub position: Position,
    /// Bearing in radians (0 = +y, clockwise).
    pub heading: f64,
    pub health: f64,
    pub max_health: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub level: u32,
    pub xp: f64,
    pub xp_cap: f64,
    pub active_slot: Option<usize>,
    pub slots: Vec<SlotView>,
}

/// One weapon slot as shown on the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub mode: WeaponMode,
    pub enabled: bool,
    pub unlock_level: u32,
    pub fire_rate: f64,
    pub has_target: bool,
}

/// An enemy ship on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub ship: u32,
    pub class: ShipClass,
    pub position: Position,
    pub heading: f64,
    /// Health as a fraction of max, clamped to [0, 1].
    pub health_fraction: f64,
    /// Shield as a fraction of max, clamped to [0, 1]; 0 for shieldless hulls.
    pub shield_fraction: f64,
    pub behavior: Option<BehaviorMode>,
    pub pursuit: Option<PursuitPhase>,
}
