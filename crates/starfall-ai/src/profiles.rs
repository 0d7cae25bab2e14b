//! Behavior profiles.
//!
//! Maps the configured behavior of an enemy class onto the runtime state the
//! engine attaches to a freshly spawned ship.

use starfall_core::components::{BehaviorState, PursuitState};
use starfall_core::config::BehaviorConfig;

use crate::{fsm, pursuit};

/// Runtime behavior state for a new ship. Exactly one is attached per enemy.
#[derive(Debug, Clone)]
pub enum InitialBehavior {
    Skirmish(BehaviorState),
    Pursuit(PursuitState),
}

/// Build the starting state for a configured behavior.
pub fn initial_behavior(cfg: &BehaviorConfig) -> InitialBehavior {
    match cfg {
        BehaviorConfig::Skirmish(params) => InitialBehavior::Skirmish(fsm::new_state(*params)),
        BehaviorConfig::Pursuit(params) => InitialBehavior::Pursuit(pursuit::new_state(*params)),
    }
}

/// Whether ships with this behavior point their nose at the player instantly
/// rather than turning at their rigid-body rate.
pub fn snaps_facing(cfg: &BehaviorConfig) -> bool {
    matches!(cfg, BehaviorConfig::Skirmish(_))
}
