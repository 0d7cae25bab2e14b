//! Health and shield pool rules.
//!
//! Shields absorb damage first; overflow carries into health. Regeneration is
//! gated by a cooldown since the last hit.

use starfall_core::components::Vitals;
use starfall_core::config::VitalsConfig;

/// What a single damage application did to a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageOutcome {
    pub shield_absorbed: f64,
    pub health_lost: f64,
    /// True only on the hit that first took health to zero or below.
    pub died: bool,
}

/// Build a full pool from configuration. Regeneration is allowed immediately.
pub fn new_vitals(cfg: &VitalsConfig) -> Vitals {
    Vitals {
        max_health: cfg.max_health,
        health: cfg.max_health,
        max_shield: cfg.max_shield.max(0.0),
        shield: cfg.max_shield.max(0.0),
        shield_regen_rate: cfg.shield_regen_rate,
        shield_regen_cooldown: cfg.shield_regen_cooldown,
        last_damage_at: -cfg.shield_regen_cooldown,
        damage_multiplier: cfg.damage_multiplier,
        dead: false,
    }
}

/// Apply `amount` damage at simulation time `now`.
///
/// Negative amounts count as zero. A zero hit changes nothing but still
/// restarts the regen cooldown. Calls on a dead pool do nothing.
pub fn apply_damage(vitals: &mut Vitals, amount: f64, now: f64) -> DamageOutcome {
    if vitals.dead {
        return DamageOutcome::default();
    }

    let amount = amount.max(0.0);
    vitals.last_damage_at = now;

    let mut outcome = DamageOutcome::default();
    if vitals.shield > 0.0 {
        let overflow = amount - vitals.shield;
        outcome.shield_absorbed = amount.min(vitals.shield);
        vitals.shield = (vitals.shield - amount).max(0.0);
        if overflow > 0.0 {
            vitals.health -= overflow;
            outcome.health_lost = overflow;
        }
    } else {
        vitals.health -= amount;
        outcome.health_lost = amount;
    }

    if vitals.health <= 0.0 {
        vitals.dead = true;
        outcome.died = true;
    }

    outcome
}

/// Regenerate shield for `dt` seconds if the cooldown since the last hit has elapsed.
pub fn regen_tick(vitals: &mut Vitals, dt: f64, now: f64) {
    if vitals.dead || vitals.shield >= vitals.max_shield {
        return;
    }
    if now - vitals.last_damage_at >= vitals.shield_regen_cooldown {
        vitals.shield = (vitals.shield + vitals.shield_regen_rate * dt).min(vitals.max_shield);
    }
}

/// Scale a weapon's base damage by the owner's outgoing multiplier.
pub fn apply_damage_multiplier(vitals: &Vitals, base_damage: f64) -> f64 {
    base_damage * vitals.damage_multiplier
}

/// Restore up to `amount` shield without exceeding the maximum. Returns the amount restored.
pub fn restore_shield(vitals: &mut Vitals, amount: f64) -> f64 {
    if vitals.dead {
        return 0.0;
    }
    let before = vitals.shield;
    vitals.shield = (vitals.shield + amount.max(0.0)).min(vitals.max_shield);
    vitals.shield - before
}

/// Health as a fraction of max, clamped to [0, 1].
pub fn health_fraction(vitals: &Vitals) -> f64 {
    if vitals.max_health <= 0.0 {
        return 0.0;
    }
    (vitals.health / vitals.max_health).clamp(0.0, 1.0)
}

/// Shield as a fraction of max, clamped to [0, 1]. Shieldless hulls read 0.
pub fn shield_fraction(vitals: &Vitals) -> f64 {
    if vitals.max_shield <= 0.0 {
        return 0.0;
    }
    (vitals.shield / vitals.max_shield).clamp(0.0, 1.0)
}
