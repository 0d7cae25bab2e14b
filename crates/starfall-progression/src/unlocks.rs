//! Weapon slots locked behind player levels.

use starfall_core::components::Armament;

/// Level needed for slot `index`. Slots without an entry unlock at level 1.
pub fn unlock_level(armament: &Armament, index: usize) -> u32 {
    armament.unlock_levels.get(index).copied().unwrap_or(1)
}

pub fn is_unlocked(armament: &Armament, index: usize, level: u32) -> bool {
    level >= unlock_level(armament, index)
}

/// Enable every slot the current level allows. Returns the slots that just became usable.
pub fn refresh_unlocks(armament: &mut Armament, level: u32) -> Vec<usize> {
    let mut newly_unlocked = Vec::new();
    for index in 0..armament.slots.len() {
        let unlocked = is_unlocked(armament, index, level);
        let slot = &mut armament.slots[index];
        if unlocked && !slot.enabled {
            newly_unlocked.push(index);
        }
        slot.enabled = unlocked;
    }
    newly_unlocked
}
