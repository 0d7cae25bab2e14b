//! Routes XP into a ledger and applies the consequences of each level-up.

use hecs::{Entity, World};

use starfall_core::components::{Armament, ProgressionLedger, Vitals};
use starfall_core::config::LevelUpScaling;
use starfall_core::events::SimEvent;
use starfall_progression::ledger::add_xp;
use starfall_progression::scaling::apply_level_up;
use starfall_progression::unlocks::refresh_unlocks;

/// Credit `amount` XP to `owner` and rescale it once per level reached, in order.
///
/// Returns the levels reached. Owners without a ledger gain nothing.
pub fn award_xp(
    world: &mut World,
    owner: Entity,
    amount: f64,
    source: &str,
    scaling: &LevelUpScaling,
    events: &mut Vec<SimEvent>,
) -> Vec<u32> {
    let levels = {
        let Ok(mut ledger) = world.get::<&mut ProgressionLedger>(owner) else {
            return Vec::new();
        };
        add_xp(&mut ledger, amount)
    };
    events.push(SimEvent::XpAwarded {
        amount,
        source: source.to_string(),
    });

    let Some(&reached) = levels.last() else {
        return levels;
    };

    let mut vitals = world.get::<&mut Vitals>(owner).ok();
    let mut armament = world.get::<&mut Armament>(owner).ok();

    for &level in &levels {
        if let Some(vitals) = vitals.as_deref_mut() {
            apply_level_up(vitals, armament.as_deref_mut(), scaling);
        }
        events.push(SimEvent::LeveledUp { level });
    }

    if let Some(armament) = armament.as_deref_mut() {
        for slot in refresh_unlocks(armament, reached) {
            tracing::info!(slot, level = reached, "weapon slot unlocked");
            events.push(SimEvent::SlotUnlocked { slot });
        }
    }

    levels
}
