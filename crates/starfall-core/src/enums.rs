//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Who controls a weapon slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponMode {
    /// Fires while the owner's trigger is held.
    Manual,
    /// Scans for opponents in range and arc and fires on its own.
    #[default]
    Autonomous,
}

/// Movement mode of the skirmisher behavior machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorMode {
    /// Circle the player sideways while facing it.
    #[default]
    Strafe,
    /// Fly a fixed random direction for a while.
    RandomFly,
}

/// Pursuit phase for chasing ships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitPhase {
    /// Turning toward the player and thrusting forward.
    #[default]
    Seek,
    /// Overshooting the player; steering is suspended until the resume time.
    PassThrough,
}

/// Side an entity fights for. Opponents are any other faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Hostile,
}

impl Faction {
    pub fn is_opponent_of(self, other: Faction) -> bool {
        self != other
    }
}

/// Enemy hull classes. Each maps onto a category tag used by the reward table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    Small,
    Medium,
    Large,
}

impl ShipClass {
    /// Category tag carried by ships of this class.
    pub fn tag(self) -> &'static str {
        match self {
            ShipClass::Small => "SmallEnemy",
            ShipClass::Medium => "MediumEnemy",
            ShipClass::Large => "LargeEnemy",
        }
    }
}

/// How an autonomous slot chooses among several qualifying opponents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPolicy {
    /// First qualifying candidate in scan order.
    #[default]
    FirstInScan,
    /// Closest qualifying candidate.
    Nearest,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// The player ship has been destroyed.
    GameOver,
}
