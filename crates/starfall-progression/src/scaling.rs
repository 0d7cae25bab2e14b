//! Stat growth applied to a ship each time its ledger levels up.

use starfall_core::components::{Armament, Vitals};
use starfall_core::config::LevelUpScaling;

/// Apply one level's worth of growth. Call once per level reached, in order.
pub fn apply_level_up(vitals: &mut Vitals, armament: Option<&mut Armament>, scaling: &LevelUpScaling) {
    vitals.max_health *= scaling.max_health_factor;
    if scaling.full_heal && !vitals.dead {
        vitals.health = vitals.max_health;
    }
    vitals.damage_multiplier *= scaling.damage_factor;

    if let Some(armament) = armament {
        for slot in &mut armament.slots {
            slot.fire_rate *= scaling.fire_rate_factor;
        }
    }
}
