//! XP ledger and the level-up loop.

use starfall_core::components::{ProgressionLedger, TierRange};
use starfall_core::config::ProgressionConfig;
use starfall_core::constants::MIN_XP_CAP;

/// Start a ledger at level 1 with no XP.
///
/// A non-positive initial cap would make the level-up loop spin, so it is
/// clamped to `MIN_XP_CAP`.
pub fn new_ledger(cfg: &ProgressionConfig) -> ProgressionLedger {
    let xp_cap = if cfg.initial_xp_cap < MIN_XP_CAP {
        tracing::warn!(
            configured = cfg.initial_xp_cap,
            clamped = MIN_XP_CAP,
            "initial XP cap too small; clamping"
        );
        MIN_XP_CAP
    } else {
        cfg.initial_xp_cap
    };

    ProgressionLedger {
        level: 1,
        xp: 0.0,
        xp_cap,
        tiers: cfg.tiers.clone(),
    }
}

/// Cap increase for reaching `level`: the first tier containing it, or 0.
pub fn cap_increase_for(tiers: &[TierRange], level: u32) -> f64 {
    tiers
        .iter()
        .find(|t| t.start <= level && level <= t.end)
        .map(|t| t.cap_increase)
        .unwrap_or(0.0)
}

/// Credit `amount` XP and run the level-up loop.
///
/// Returns the new levels reached, in order. Leaves `0 <= xp < xp_cap`.
pub fn add_xp(ledger: &mut ProgressionLedger, amount: f64) -> Vec<u32> {
    let mut levels = Vec::new();
    if !amount.is_finite() || amount <= 0.0 {
        return levels;
    }

    ledger.xp += amount;
    while ledger.xp >= ledger.xp_cap {
        ledger.xp -= ledger.xp_cap;
        ledger.level += 1;
        ledger.xp_cap = (ledger.xp_cap + cap_increase_for(&ledger.tiers, ledger.level)).max(MIN_XP_CAP);
        tracing::info!(level = ledger.level, xp_cap = ledger.xp_cap, "level up");
        levels.push(ledger.level);
    }

    levels
}

/// Progress toward the next level as a fraction in [0, 1).
pub fn progress_fraction(ledger: &ProgressionLedger) -> f64 {
    (ledger.xp / ledger.xp_cap).clamp(0.0, 1.0)
}
