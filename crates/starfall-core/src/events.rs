//! Events emitted by the simulation for audio, UI and logging consumers.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something that happened during a tick. Drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A weapon slot released a projectile.
    WeaponFired { ship: u32, slot: usize, damage: f64 },
    /// An autonomous slot locked onto a new opponent.
    TargetAcquired { ship: u32, slot: usize, target: u32 },
    /// An autonomous slot dropped its target (out of range/arc or destroyed).
    TargetLost { ship: u32, slot: usize },
    /// A projectile hit a ship.
    DamageTaken {
        ship: u32,
        shield_absorbed: f64,
        health_lost: f64,
    },
    /// A ship's health reached zero. Emitted once per ship.
    ShipDestroyed { ship: u32, tag: String },
    /// Experience credited to a ledger.
    XpAwarded { amount: f64, source: String },
    /// A kill carried a category tag the reward table does not know.
    RewardAnomaly { tag: String },
    /// A ledger gained a level. One event per level, in order.
    LeveledUp { level: u32 },
    /// The player took manual control of a slot.
    SlotSelected { slot: usize },
    /// The player tried to select a slot that is still locked.
    SlotLocked { slot: usize, required_level: u32 },
    /// A slot became usable after a level-up.
    SlotUnlocked { slot: usize },
    /// A collectible was picked up.
    PickupCollected { kind: String },
    /// A skirmisher switched movement mode.
    BehaviorChanged { ship: u32, mode: BehaviorMode },
    /// A chaser switched between seeking and passing through.
    PursuitChanged { ship: u32, phase: PursuitPhase },
}
