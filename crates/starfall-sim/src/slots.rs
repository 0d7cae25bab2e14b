//! Weapon slot manager.
//!
//! At most one slot is under manual control at a time. Selecting a slot hands
//! it to the trigger and returns the previous manual slot to autonomous fire.

use starfall_combat::targeting::activate;
use starfall_core::components::Armament;
use starfall_core::enums::WeaponMode;
use starfall_progression::unlocks::{is_unlocked, unlock_level};

/// Result of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected { previous: Option<usize> },
    AlreadyActive,
    Locked { required_level: u32 },
    OutOfRange,
}

/// Put slot `index` under manual control if `level` allows it.
pub fn select_slot(armament: &mut Armament, index: usize, level: u32) -> SelectOutcome {
    if index >= armament.slots.len() {
        tracing::warn!(index, slots = armament.slots.len(), "weapon slot index out of range");
        return SelectOutcome::OutOfRange;
    }
    if !is_unlocked(armament, index, level) {
        let required_level = unlock_level(armament, index);
        tracing::info!(slot = index, required_level, level, "weapon slot is locked");
        return SelectOutcome::Locked { required_level };
    }
    if armament.active == Some(index) {
        return SelectOutcome::AlreadyActive;
    }

    let previous = armament.active;
    if let Some(prev) = previous {
        if let Some(slot) = armament.slots.get_mut(prev) {
            activate(slot, WeaponMode::Autonomous);
        }
    }
    activate(&mut armament.slots[index], WeaponMode::Manual);
    armament.active = Some(index);
    tracing::info!(slot = index, ?previous, "weapon slot selected");

    SelectOutcome::Selected { previous }
}
